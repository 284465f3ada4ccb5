pub mod ply;

#[cfg(feature = "stl-io")]
pub mod stl;

/// Generic I/O and format‑conversion errors.
///
/// Some I/O backends are behind cargo feature‑flags.
#[derive(Debug)]
pub enum IoError {
    StdIo(std::io::Error),

    MalformedInput(String),
    MalformedPath(String),
    Unimplemented(String),
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use IoError::*;

        match self {
            StdIo(error) => write!(f, "std::io::Error: {error}"),

            MalformedInput(msg) => write!(f, "Input is malformed: {msg}"),
            MalformedPath(msg) => write!(f, "The path is malformed: {msg}"),
            Unimplemented(msg) => write!(f, "Feature is not implemented: {msg}"),
        }
    }
}

impl std::error::Error for IoError {}

impl From<std::io::Error> for IoError {
    fn from(value: std::io::Error) -> Self {
        Self::StdIo(value)
    }
}

/// Output formats understood by [`write_mesh_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    /// ASCII PLY
    Ply,
    /// ASCII STL
    #[cfg(feature = "stl-io")]
    StlAscii,
    /// Binary STL
    #[cfg(feature = "stl-io")]
    StlBinary,
}

impl MeshFormat {
    /// Guess the format from a file extension (`.ply`, `.stl`).
    pub fn from_path(path: &std::path::Path) -> Result<Self, IoError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| IoError::MalformedPath(format!("{} has no extension", path.display())))?;
        match ext.as_str() {
            "ply" => Ok(MeshFormat::Ply),
            #[cfg(feature = "stl-io")]
            "stl" => Ok(MeshFormat::StlBinary),
            other => Err(IoError::Unimplemented(format!("no writer for .{other} files"))),
        }
    }
}

/// Serialize `shape` in `format` and write it to `path`.
pub fn write_mesh_file<T: crate::triangulated::Triangulated3D>(
    shape: &T,
    path: &std::path::Path,
    format: MeshFormat,
) -> Result<(), IoError> {
    let bytes = match format {
        MeshFormat::Ply => ply::to_ply_ascii(shape).into_bytes(),
        #[cfg(feature = "stl-io")]
        MeshFormat::StlAscii => stl::to_stl_ascii(shape, &stem(path)).into_bytes(),
        #[cfg(feature = "stl-io")]
        MeshFormat::StlBinary => stl::to_stl_binary(shape, &stem(path))?,
    };
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(feature = "stl-io")]
fn stem(path: &std::path::Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("mesh")
        .to_string()
}
