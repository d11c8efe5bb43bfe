use std::cell::Cell;
use std::rc::Rc;

use iced::widget::{button, column, container, row, text};
use iced::{Element, Length};
use tabstack::{
    ControlId, DragSession, FolderMetrics, MenuRequest, PartId, PartProperty,
    PartRef, Point, PresentablePart, Rect, Side, StackPresentationSite,
    StackState, StripTabFolder, TabbedStackPresentation,
};
use tabstack_ui_folder::{FolderInput, FolderMessage, FolderView};

const STACK_BOUNDS: Rect = Rect::new(0, 0, 640, 400);

#[derive(Debug, Clone)]
enum Message {
    Folder(FolderMessage),
    AddPart,
    ToggleDirty,
}

struct Part {
    id: PartId,
    name: String,
    body: String,
    dirty: Cell<bool>,
    visible: Cell<bool>,
    bounds: Cell<Rect>,
}

impl Part {
    fn new(id: u64, name: &str, body: &str) -> Rc<Self> {
        Rc::new(Self {
            id: PartId(id),
            name: name.to_owned(),
            body: body.to_owned(),
            dirty: Cell::new(false),
            visible: Cell::new(false),
            bounds: Cell::new(Rect::default()),
        })
    }
}

impl PresentablePart for Part {
    fn id(&self) -> PartId {
        self.id
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn title(&self) -> String {
        format!("{} - stack demo", self.name)
    }

    fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    fn set_bounds(&self, bounds: Rect) {
        self.bounds.set(bounds);
    }

    fn control(&self) -> ControlId {
        ControlId(100 + self.id.0)
    }
}

/// Requests the stack made; the app answers them after each update.
enum SiteRequest {
    State(StackState),
    Close(Vec<PartRef>),
    Select(PartRef),
}

#[derive(Default)]
struct Site {
    state: StackState,
    selection: Option<PartRef>,
    requests: Vec<SiteRequest>,
}

impl StackPresentationSite for Site {
    fn state(&self) -> StackState {
        self.state
    }

    fn set_state(&mut self, state: StackState) {
        self.requests.push(SiteRequest::State(state));
    }

    fn close(&mut self, parts: &[PartRef]) {
        self.requests.push(SiteRequest::Close(parts.to_vec()));
    }

    fn select_part(&mut self, part: &PartRef) {
        self.requests.push(SiteRequest::Select(part.clone()));
    }

    fn drag_start_part(
        &mut self,
        part: &PartRef,
        initial_location: Point,
        _keyboard: bool,
        session: &DragSession<'_>,
    ) -> tabstack::Result<()> {
        let target = session.drag_over(initial_location);
        log::info!(
            "drag {part:?} from {initial_location:?}, target {target:?}"
        );
        Ok(())
    }

    fn drag_start_stack(
        &mut self,
        initial_location: Point,
        _keyboard: bool,
    ) -> tabstack::Result<()> {
        log::info!("drag stack from {initial_location:?}");
        Ok(())
    }

    fn selected_part(&self) -> Option<PartRef> {
        self.selection.clone()
    }

    fn part_list(&self) -> Vec<PartRef> {
        Vec::new()
    }

    fn flush_layout(&mut self) -> tabstack::Result<()> {
        Ok(())
    }
}

type Stack = TabbedStackPresentation<StripTabFolder, Site>;

struct AppState {
    stack: Stack,
    input: FolderInput,
    parts: Vec<Rc<Part>>,
    next_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        let folder = StripTabFolder::new(
            ControlId(1),
            FolderMetrics::default(),
            Side::Top,
        );
        let mut state = AppState {
            stack: TabbedStackPresentation::new(Site::default(), folder),
            input: FolderInput::new(),
            parts: Vec::new(),
            next_id: 1,
        };
        state.stack.set_bounds(STACK_BOUNDS);

        for (name, body) in [
            ("README.md", "Tabs can be dragged, closed and maximized."),
            ("main.rs", "fn main() {}"),
            ("Cargo.toml", "[package]"),
        ] {
            if let Err(err) = state.add(name, body) {
                log::warn!("failed to add {name}: {err}");
            }
        }
        if let Some(first) = state.parts.first().map(PartRef::new) {
            select(&mut state, &first);
        }
        state
    }
}

impl AppState {
    fn add(&mut self, name: &str, body: &str) -> tabstack::Result<PartRef> {
        let part = Part::new(self.next_id, name, body);
        self.next_id += 1;
        let handle = PartRef::new(&part);
        self.parts.push(part);
        self.stack.add_part(&handle, None)?;
        Ok(handle)
    }

    fn current(&self) -> Option<&Rc<Part>> {
        let current = self.stack.part_folder().current()?;
        self.parts.iter().find(|part| part.id == current.id())
    }
}

fn select(state: &mut AppState, part: &PartRef) {
    state.stack.site_mut().selection = Some(part.clone());
    if let Err(err) = state.stack.select_part(part) {
        log::warn!("failed to select {part:?}: {err}");
    }
}

/// Answer everything the stack asked its site for.
fn answer_site(state: &mut AppState) {
    let requests = std::mem::take(&mut state.stack.site_mut().requests);
    for request in requests {
        let result = match request {
            SiteRequest::State(next) => {
                state.stack.site_mut().state = next;
                state.stack.set_state(next);
                Ok(())
            },
            SiteRequest::Close(parts) => {
                let mut result = Ok(());
                for part in &parts {
                    result = result.and(state.stack.remove_part(part));
                    state.parts.retain(|candidate| candidate.id != part.id());
                }
                if let Some(next) = state.stack.part_list().first().cloned() {
                    select(state, &next);
                }
                result
            },
            SiteRequest::Select(part) => {
                select(state, &part);
                Ok(())
            },
        };
        if let Err(err) = result {
            log::warn!("site request failed: {err}");
        }
    }

    if let Some(menu) = state.stack.take_menu_request() {
        match menu {
            MenuRequest::PartList { location } => {
                let names: Vec<_> =
                    state.parts.iter().map(|part| part.name.as_str()).collect();
                log::info!("part list at {location:?}: {names:?}");
            },
            other => log::info!("menu requested: {other:?}"),
        }
    }
}

fn update(state: &mut AppState, message: Message) {
    match message {
        Message::Folder(input) => {
            state.input.apply(state.stack.folder_mut(), input);
            if let Err(err) = state.stack.process_folder_events() {
                log::warn!("folder event failed: {err}");
            }
        },
        Message::AddPart => {
            let name = format!("untitled-{}", state.next_id);
            match state.add(&name, "") {
                Ok(part) => select(state, &part),
                Err(err) => log::warn!("failed to add {name}: {err}"),
            }
        },
        Message::ToggleDirty => {
            if let Some(part) = state.current().cloned() {
                part.dirty.set(!part.dirty.get());
                let handle = PartRef::new(&part);
                let changed = state
                    .stack
                    .part_property_changed(&handle, PartProperty::Dirty);
                if let Err(err) = changed {
                    log::warn!("failed to mark {:?}: {err}", part.id);
                }
            }
        },
    }
    answer_site(state);
}

fn view(state: &AppState) -> Element<'_, Message> {
    let body = match state.current() {
        Some(part) => text(part.body.as_str()),
        None => text("No part selected"),
    };

    let stack = FolderView::new(state.stack.folder(), Message::Folder)
        .content(container(body).padding(12))
        .view();

    let actions = row![
        button(text("New part")).on_press(Message::AddPart),
        button(text("Toggle dirty")).on_press(Message::ToggleDirty),
    ]
    .spacing(8);

    column![
        container(stack)
            .width(Length::Fixed(STACK_BOUNDS.width as f32))
            .height(Length::Fixed(STACK_BOUNDS.height as f32)),
        actions,
    ]
    .spacing(8)
    .into()
}

fn main() -> iced::Result {
    env_logger::init();
    iced::run(update, view)
}
