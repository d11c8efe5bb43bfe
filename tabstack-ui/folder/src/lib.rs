//! [`iced`] rendering for [`tabstack`] strip folders.
//!
//! The folder model lives in `tabstack` and knows nothing about iced. This
//! crate adds the two pieces an iced application needs:
//! - [`FolderView`] draws a [`tabstack::StripTabFolder`] with the geometry
//!   the folder computed, plus a slot for the selected part's content;
//! - [`FolderInput`] remembers where the pointer is and feeds the
//!   [`FolderMessage`]s the view produces back into the folder's input
//!   handling.
//!
//! The usual loop:
//! 1. render the stack's folder with [`FolderView`] inside your `view`;
//! 2. in `update`, call [`FolderInput::apply`] on
//!    `presentation.folder_mut()`;
//! 3. call `presentation.process_folder_events()` so the stack reacts.
//!
//! See `examples/stack_demo.rs` for a complete runnable example.

mod view;

pub use view::{FolderInput, FolderMessage, FolderView, TabContext};
