//! Output file names, derived from the input image's base name.

use std::path::Path;

/// The three outputs of one conversion, written to the current directory.
pub struct OutputNames {
    /// Visible model, `mdl_<stem>.smd`.
    pub model: String,
    /// Collision box, `mdl_<stem>_phys.smd`.
    pub collision: String,
    /// Texture strip, `tex_<stem>.png`. Also the material name inside the
    /// SMD files.
    pub texture: String,
}

pub fn derive(input: &Path) -> OutputNames {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("model");
    OutputNames {
        model: format!("mdl_{stem}.smd"),
        collision: format!("mdl_{stem}_phys.smd"),
        texture: format!("tex_{stem}.png"),
    }
}
