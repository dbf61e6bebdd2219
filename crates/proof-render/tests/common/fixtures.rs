//! Description texts shared by integration tests.

/// 8×8 paper at a uniform mid height, white and slightly glossy.
pub const FLAT_PAPER: &str = "\
# flat test paper
p 20
m 10
c 5
S 0.5 0.3
380 0.08
780 0.08
D 0.9
380 1
780 1
A 0.3
380 1
780 1
r 8 8
200 200 200 200 200 200 200 200
200 200 200 200 200 200 200 200
200 200 200 200 200 200 200 200
200 200 200 200 200 200 200 200
200 200 200 200 200 200 200 200
200 200 200 200 200 200 200 200
200 200 200 200 200 200 200 200
200 200 200 200 200 200 200 200
";

/// 6×6 paper with ridges running along y.
pub const RIDGED_PAPER: &str = "\
p 20
m 15
c 5
D 0.9
380 1
780 1
A 0.3
380 1
780 1
r 6 6
0 255 0 255 0 255
0 255 0 255 0 255
0 255 0 255 0 255
0 255 0 255 0 255
0 255 0 255 0 255
0 255 0 255 0 255
";

/// Cyan-ish ink covering a 0.1 mm square at (0.1 mm, 0.1 mm).
pub const CYAN_BOX_INK: &str = "\
p 20
l 0.1 0.1
a 3
s 1
d 0
i BOX 0.1 0.1 1
S 0.9 0.2
380 0.05
780 0.05
D 1
380 0.9
500 0.8
600 0.05
780 0.05
A 1
380 0.9
500 0.8
600 0.05
780 0.05
c 3 3
0.05 0.1 0.05
0.1 0.4 0.1
0.05 0.1 0.05
";

/// White point light straight above the origin.
pub const OVERHEAD_LIGHT: &str = "\
X 0
Y 0
Z 1000
c 0.6
380 1
780 1
a 0.3
380 1
780 1
";

/// White light low over the +x horizon.
pub const RAKING_LIGHT: &str = "\
X 1000
Y 0
Z 150
c 0.8
380 1
780 1
a 0.1
380 1
780 1
";
