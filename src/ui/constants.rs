// ui/constants.rs

pub const SKYLINE: &str = r#"
         |                  _|_                      ___
        |.|   ___          |.:.|      ___     _     |. .|   __
   __   |.|  |. .|   ___   |.:.|     |:::|   |.|    |. .|  |..|
  |..|  |.|  |. .|  |:::|  |.:.| ___ |:::|  _|.|_   |. .|  |..|
  |..|__|.|__|. .|__|:::|__|.:.||. .||:::|_|.:.:.|__|. .|__|..|
 _|..|::|.|::|. .|::|:::|::|.:.||. .||:::|:|.:.:.|::|. .|::|..|_
"#;

pub const TITLE: &str = "T I M E S   S Q U A R E   N O I R";

pub const PREMISE: &str = "The year is 1986. You are Brock, fresh off the bus from upstate, trying to make it in a New York City that chews up dreamers and spits them out. This is your story.";

pub const SUBTITLE: &str = "An Interactive Fiction - NYC, 1986";

pub const CHARACTER_DETAILS: [(&str, &str); 3] = [
    ("Age", "26"),
    ("Occupation", "Waiter at Dino's Pizza-Pies"),
    ("Residence", "Studio Apt, Hell's Kitchen"),
];
