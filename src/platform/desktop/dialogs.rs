use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::usecase::ports::parser::SourceFormat;

pub fn pick_spreadsheet() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("Planilhas", &SourceFormat::EXTENSIONS)
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx", "xls"])
        .pick_file()
}

pub fn pick_export_target(suggested_name: &str) -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("CSV", &["csv"])
        .set_file_name(suggested_name)
        .save_file()
}

pub fn confirm_clear() -> bool {
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Limpar dados")
        .set_description("Tem certeza que deseja limpar todos os dados?")
        .set_buttons(MessageButtons::YesNo)
        .show()
        == MessageDialogResult::Yes
}
