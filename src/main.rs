// main.rs
//
// Generate a sphere mesh and write it to disk.

use clap::{Parser, Subcommand, ValueEnum};
use geodome::TriangleMesh;
use geodome::io::{IoError, MeshFormat, write_mesh_file};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Unit sphere meshes: geodesic domes and Fibonacci spheres
#[derive(Parser)]
#[command(name = "geodome")]
#[command(about = "Generate triangle meshes approximating the unit sphere", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output file
    #[arg(short, long, global = true, default_value = "a.ply")]
    output: PathBuf,

    /// Output format (default: guessed from the output extension)
    #[arg(short, long, global = true, value_enum)]
    format: Option<Format>,
}

#[derive(Subcommand)]
enum Commands {
    /// Icosahedron subdivided LEVELS times
    Dome {
        /// Number of subdivision rounds
        #[arg(short, long, default_value_t = 3, allow_negative_numbers = true)]
        levels: i32,
    },

    /// Fibonacci spiral points triangulated by their convex hull
    Fibonacci {
        /// Number of points
        #[arg(short, long, default_value_t = 1000)]
        samples: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Ply,
    Stl,
    StlAscii,
}

impl Format {
    fn mesh_format(self) -> Result<MeshFormat, IoError> {
        match self {
            Format::Ply => Ok(MeshFormat::Ply),
            #[cfg(feature = "stl-io")]
            Format::Stl => Ok(MeshFormat::StlBinary),
            #[cfg(feature = "stl-io")]
            Format::StlAscii => Ok(MeshFormat::StlAscii),
            #[cfg(not(feature = "stl-io"))]
            Format::Stl | Format::StlAscii => {
                Err(IoError::Unimplemented("built without the `stl-io` feature".into()))
            },
        }
    }
}

/// The explicit `--format`, or else the format implied by the output path.
fn output_format(format: Option<Format>, output: &Path) -> Result<MeshFormat, IoError> {
    match format {
        Some(format) => format.mesh_format(),
        None => MeshFormat::from_path(output),
    }
}

fn build_mesh(command: Commands) -> Result<TriangleMesh, String> {
    let mesh = match command {
        Commands::Dome { levels } => TriangleMesh::geodesic_sphere(levels),
        #[cfg(feature = "chull-io")]
        Commands::Fibonacci { samples } => TriangleMesh::fibonacci_sphere(samples),
        #[cfg(not(feature = "chull-io"))]
        Commands::Fibonacci { .. } => {
            return Err("built without the `chull-io` feature".to_string());
        },
    };
    mesh.map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mesh = match build_mesh(cli.command) {
        Ok(mesh) => mesh,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        },
    };

    // Check the number of vertices / faces
    println!(
        "num of vertices = {}, num of faces = {}",
        mesh.vertex_count(),
        mesh.face_count()
    );

    let written = output_format(cli.format, &cli.output)
        .and_then(|format| write_mesh_file(&mesh, &cli.output, format));
    if let Err(e) = written {
        eprintln!("error: could not write {}: {e}", cli.output.display());
        return ExitCode::FAILURE;
    }

    println!("wrote {}", cli.output.display());
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_level_is_an_error() {
        let err = build_mesh(Commands::Dome { levels: -1 }).unwrap_err();
        assert!(err.contains("InvalidArgument"), "{err}");
    }

    #[test]
    fn test_dome_command_builds_mesh() {
        let mesh = build_mesh(Commands::Dome { levels: 1 }).unwrap();
        assert_eq!((mesh.vertex_count(), mesh.face_count()), (42, 80));
    }

    #[cfg(feature = "chull-io")]
    #[test]
    fn test_fibonacci_command_rejects_tiny_sample() {
        assert!(build_mesh(Commands::Fibonacci { samples: 4 }).is_err());
        let mesh = build_mesh(Commands::Fibonacci { samples: 50 }).unwrap();
        assert_eq!(mesh.vertex_count(), 50);
    }

    #[test]
    fn test_explicit_format_wins() {
        assert_eq!(
            output_format(Some(Format::Ply), Path::new("out.stl")).unwrap(),
            MeshFormat::Ply
        );
    }

    #[cfg(feature = "stl-io")]
    #[test]
    fn test_stl_formats() {
        assert_eq!(Format::Stl.mesh_format().unwrap(), MeshFormat::StlBinary);
        assert_eq!(Format::StlAscii.mesh_format().unwrap(), MeshFormat::StlAscii);
        assert_eq!(output_format(None, Path::new("dome.stl")).unwrap(), MeshFormat::StlBinary);
    }

    #[cfg(not(feature = "stl-io"))]
    #[test]
    fn test_stl_formats_need_feature() {
        assert!(matches!(Format::Stl.mesh_format(), Err(IoError::Unimplemented(_))));
    }

    #[test]
    fn test_format_falls_back_to_extension() {
        assert_eq!(output_format(None, Path::new("a.ply")).unwrap(), MeshFormat::Ply);
        assert!(matches!(
            output_format(None, Path::new("mesh")),
            Err(IoError::MalformedPath(_))
        ));
        assert!(matches!(
            output_format(None, Path::new("mesh.obj")),
            Err(IoError::Unimplemented(_))
        ));
    }

    #[test]
    fn test_cli_accepts_negative_levels() {
        let cli = Cli::try_parse_from(["geodome", "dome", "-l", "-2", "-o", "x.ply"]).unwrap();
        assert!(matches!(cli.command, Commands::Dome { levels: -2 }));
        assert_eq!(cli.output, PathBuf::from("x.ply"));
        assert!(cli.format.is_none());
    }
}
