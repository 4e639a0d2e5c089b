use humansize::{file_size_opts as options, FileSize};

pub fn format_size(bytes: u64) -> String {
    bytes
        .file_size(options::BINARY)
        .unwrap_or_else(|_| format!("{} B", bytes))
}
