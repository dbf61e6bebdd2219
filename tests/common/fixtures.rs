//! Description files and configs for integration tests.

use std::fs;
use std::path::Path;

use softproof::models::ProofConfig;

/// Level paper, every cell in contact with the printing form.
pub const FLAT_PAPER: &str = "\
p 20
m 10
c 5
D 0.9
380 1
780 1
A 0.2
380 1
780 1
r 4 4
255 255 255 255
255 255 255 255
255 255 255 255
255 255 255 255
";

/// Cyan-ish ink covering a 0.2 mm square at (0.1 mm, 0.1 mm).
pub const SQUARE_INK: &str = "\
p 20
l 0.1 0.1
i BOX 0.2 0.2 1
D 1
380 0.8
550 0.4
650 0.05
780 0.05
c 1 1
1
";

/// A light straight above the origin.
pub const OVERHEAD_LIGHT: &str = "\
X 0
Y 0
Z 5000
c 0.8
380 1
780 1
a 0.5
380 1
780 1
";

/// Write paper.p, ink.i and light.l into `dir` and return a config that
/// renders a 0.4 mm square at 20 µm into `dir/proof.png`.
pub fn write_scene(dir: &Path) -> ProofConfig {
    fs::write(dir.join("paper.p"), FLAT_PAPER).unwrap();
    fs::write(dir.join("ink.i"), SQUARE_INK).unwrap();
    fs::write(dir.join("light.l"), OVERHEAD_LIGHT).unwrap();
    ProofConfig {
        width_mm: 0.4,
        height_mm: 0.4,
        dot_size: 20.0,
        paper: dir.join("paper"),
        ink: dir.join("ink"),
        light: dir.join("light"),
        output: dir.join("proof"),
        ..ProofConfig::default()
    }
}
