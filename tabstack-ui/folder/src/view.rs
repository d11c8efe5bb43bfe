use std::rc::Rc;

use iced::font::{Style, Weight};
use iced::widget::text::Wrapping;
use iced::widget::{Column, Row, Space, button, container, mouse_area, text};
use iced::{Alignment, Color, Element, Font, Length};
use tabstack::{
    FolderButton, Point, Side, StripTab, StripTabFolder, TabFolder, TabId,
    TabItem,
};

const LABEL_FONT_SIZE: f32 = 13.0;
const BUTTON_FONT_SIZE: f32 = 12.0;

/// Input a rendered folder reports back.
///
/// Only [`FolderMessage::Moved`] carries a position, in the folder's own
/// coordinate space. Button presses happen wherever the pointer last moved
/// to; [`FolderInput`] keeps track of that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderMessage {
    Moved(Point),
    Exited,
    Pressed,
    Released,
    DoubleClicked,
    ContextMenu,
    CloseClicked(TabId),
    ButtonClicked(FolderButton),
}

/// Pointer state between folder messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderInput {
    cursor: Option<Point>,
}

impl FolderInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last pointer position over the strip.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// Feed one rendered-folder message into the folder's input handling.
    ///
    /// The folder queues the resulting events; the owning presentation
    /// picks them up on its next `process_folder_events`. Pointer buttons
    /// with no known cursor position are dropped.
    pub fn apply(
        &mut self,
        folder: &mut StripTabFolder,
        message: FolderMessage,
    ) {
        log::trace!("folder input: {message:?} at {:?}", self.cursor);
        match message {
            FolderMessage::Moved(position) => {
                self.cursor = Some(position);
                folder.pointer_moved(position);
            },
            FolderMessage::Exited => self.cursor = None,
            FolderMessage::Pressed => {
                if let Some(position) = self.cursor {
                    folder.pointer_pressed(position);
                }
            },
            FolderMessage::Released => folder.pointer_released(),
            FolderMessage::DoubleClicked => {
                if let Some(position) = self.cursor {
                    folder.double_clicked(position);
                }
            },
            FolderMessage::ContextMenu => {
                if let Some(position) = self.cursor {
                    folder.context_menu(position);
                }
            },
            FolderMessage::CloseClicked(tab) => folder.close_clicked(tab),
            FolderMessage::ButtonClicked(button) => {
                folder.button_clicked(button)
            },
        }
    }
}

/// Decoration state of a single rendered tab.
pub struct TabContext<'a> {
    pub tab: &'a StripTab,
    pub is_selected: bool,
}

/// Iced view over a [`StripTabFolder`].
///
/// Tabs are drawn with the sizes the folder computed, so the widget has to
/// be placed where the folder's bounds say it is.
pub struct FolderView<'a, Message: Clone + 'a> {
    folder: &'a StripTabFolder,
    on_input: Rc<dyn Fn(FolderMessage) -> Message + 'a>,
    content: Option<Element<'a, Message>>,
    tab_style: Option<Box<dyn Fn(&TabContext<'a>) -> container::Style + 'a>>,
    show_buttons: bool,
}

impl<'a, Message: Clone + 'a> FolderView<'a, Message> {
    /// Create a view that wraps every folder message with `on_input`.
    pub fn new(
        folder: &'a StripTabFolder,
        on_input: impl Fn(FolderMessage) -> Message + 'a,
    ) -> Self {
        Self {
            folder,
            on_input: Rc::new(on_input),
            content: None,
            tab_style: None,
            show_buttons: true,
        }
    }

    /// Element shown in the folder's content area.
    pub fn content(
        mut self,
        content: impl Into<Element<'a, Message>>,
    ) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Override the style of tab backgrounds.
    pub fn tab_style(
        mut self,
        tab_style: impl Fn(&TabContext<'a>) -> container::Style + 'a,
    ) -> Self {
        self.tab_style = Some(Box::new(tab_style));
        self
    }

    /// Show or hide the part list, minimize and maximize buttons.
    pub fn show_buttons(mut self, show_buttons: bool) -> Self {
        self.show_buttons = show_buttons;
        self
    }

    pub fn view(self) -> Element<'a, Message> {
        if !self.folder.is_visible() {
            return Space::new().into();
        }

        let strip = self.strip();
        let content: Element<'a, Message> = match self.content {
            Some(content) => container(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(self.folder.metrics().border as f32)
                .into(),
            None => {
                Space::new().width(Length::Fill).height(Length::Fill).into()
            },
        };

        match self.folder.tab_position() {
            Side::Top => Column::new().push(strip).push(content).into(),
            Side::Bottom => Column::new().push(content).push(strip).into(),
            Side::Left => Row::new().push(strip).push(content).into(),
            Side::Right => Row::new().push(content).push(strip).into(),
        }
    }

    fn strip(&self) -> Element<'a, Message> {
        let folder = self.folder;
        let horizontal =
            matches!(folder.tab_position(), Side::Top | Side::Bottom);
        let selection = folder.selection();

        let mut tabs: Vec<Element<'a, Message>> = Vec::new();
        for tab in folder.tabs().iter().filter(|tab| tab.is_showing()) {
            let context = TabContext {
                tab,
                is_selected: selection == Some(tab.id()),
            };
            tabs.push(self.tab(&context));
        }

        let filler = if horizontal {
            Space::new().width(Length::Fill)
        } else {
            Space::new().height(Length::Fill)
        };
        tabs.push(filler.into());

        if self.show_buttons {
            for chrome in [
                FolderButton::PartList,
                FolderButton::Minimize,
                FolderButton::Maximize,
            ] {
                tabs.push(self.chrome_button(chrome));
            }
        }

        let area = folder.tab_area();
        let strip: Element<'a, Message> = if horizontal {
            Row::with_children(tabs)
                .width(Length::Fill)
                .height(Length::Fixed(area.height as f32))
                .align_y(Alignment::Center)
                .into()
        } else {
            Column::with_children(tabs)
                .width(Length::Fixed(area.width as f32))
                .height(Length::Fill)
                .into()
        };

        let on_move = Rc::clone(&self.on_input);
        let origin = area.origin();
        mouse_area(strip)
            .on_move(move |position| {
                on_move(FolderMessage::Moved(Point::new(
                    origin.x + position.x.round() as i32,
                    origin.y + position.y.round() as i32,
                )))
            })
            .on_exit((self.on_input)(FolderMessage::Exited))
            .on_press((self.on_input)(FolderMessage::Pressed))
            .on_release((self.on_input)(FolderMessage::Released))
            .on_double_click((self.on_input)(FolderMessage::DoubleClicked))
            .on_right_press((self.on_input)(FolderMessage::ContextMenu))
            .into()
    }

    fn tab(&self, context: &TabContext<'a>) -> Element<'a, Message> {
        let tab = context.tab;
        let info = tab.info();

        let font = Font {
            weight: if tab.is_bold() {
                Weight::Bold
            } else {
                Weight::Normal
            },
            style: if tab.is_busy() {
                Style::Italic
            } else {
                Style::Normal
            },
            ..Font::default()
        };
        let label = text(info.label())
            .size(LABEL_FONT_SIZE)
            .font(font)
            .width(Length::Fill)
            .wrapping(Wrapping::None);

        let mut content = Row::new().push(label).align_y(Alignment::Center);
        if tab.has_close() {
            let on_close =
                (self.on_input)(FolderMessage::CloseClicked(tab.id()));
            let close = button(text("x").size(BUTTON_FONT_SIZE))
                .on_press(on_close)
                .padding(0)
                .style(|_, _| button::Style::default());
            content = content.push(close);
        }

        let bounds = tab.bounds();
        let style = match self.tab_style {
            Some(ref tab_style) => tab_style(context),
            None => default_tab_style(context),
        };
        container(content)
            .padding([0, self.folder.metrics().tab_padding as u16])
            .width(Length::Fixed(bounds.width as f32))
            .height(Length::Fixed(bounds.height as f32))
            .align_y(Alignment::Center)
            .style(move |_| style)
            .into()
    }

    fn chrome_button(&self, chrome: FolderButton) -> Element<'a, Message> {
        let label = match chrome {
            FolderButton::PartList => "v",
            FolderButton::Minimize => "_",
            FolderButton::Maximize => "[]",
        };
        let bounds = self.folder.button_bounds(chrome);
        button(text(label).size(BUTTON_FONT_SIZE).align_x(Alignment::Center))
            .on_press((self.on_input)(FolderMessage::ButtonClicked(chrome)))
            .padding(0)
            .width(Length::Fixed(bounds.width as f32))
            .height(Length::Fixed(bounds.height as f32))
            .style(|_, _| button::Style::default())
            .into()
    }
}

fn default_tab_style(context: &TabContext<'_>) -> container::Style {
    let background = if context.is_selected {
        Color::from_rgb(0.12, 0.26, 0.46)
    } else {
        Color::from_rgb(0.18, 0.18, 0.18)
    };

    container::Style {
        background: Some(background.into()),
        text_color: Some(Color::from_rgb(0.9, 0.9, 0.9)),
        ..Default::default()
    }
}
