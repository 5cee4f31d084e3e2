pub mod char_counter;
pub mod code_editor;
pub mod comments;
pub mod profile_editor;
pub mod search_page;
pub mod snippet_card;
pub mod tag_editor;
pub mod theme_button;
pub mod toast;
pub mod visibility_picker;
