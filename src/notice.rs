//! Completion notice
//!
//! Pure text: the manual follow-up steps printed after a successful
//! bootstrap. Kept out of `main` so the wording can be asserted in tests and
//! is only ever emitted once the install steps have returned successfully.

use crate::config::EditorConfig;
use std::path::Path;

/// Render the editor follow-up instructions
pub fn completion_notice(venv_python: &Path, editor: &EditorConfig) -> String {
    let mut notice = String::new();

    notice.push_str("Environment setup complete.\n");
    notice.push('\n');
    notice.push_str(&format!("To use the environment in {}:\n", editor.name));
    notice.push_str("  1. Open the Command Palette (Ctrl+Shift+P / Cmd+Shift+P)\n");
    notice.push_str("  2. Run 'Python: Select Interpreter'\n");
    notice.push_str(&format!(
        "  3. Choose: {}\n",
        venv_python.display()
    ));

    notice
}

/// Render the shell activation hint
pub fn activation_hint(venv_dir: &Path) -> String {
    #[cfg(windows)]
    {
        format!(
            "To activate the environment in a shell:\n  {}\\Scripts\\activate\n",
            venv_dir.display()
        )
    }
    #[cfg(not(windows))]
    {
        format!(
            "To activate the environment in a shell:\n  source {}/bin/activate\n",
            venv_dir.display()
        )
    }
}
