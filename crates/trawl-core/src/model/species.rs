use crate::model::depth::{Depth, DepthSet};
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Species {
    GiantKrill = 0,
    Haddock = 1,
    Yellowfin = 2,
    Halibut = 3,
    Bluefin = 4,
    Marlin = 5,
    Shimmering = 6,
    Glistening = 7,
    Vibrant = 8,
}

impl Species {
    pub const ALL: [Species; 9] = [
        Species::GiantKrill,
        Species::Haddock,
        Species::Yellowfin,
        Species::Halibut,
        Species::Bluefin,
        Species::Marlin,
        Species::Shimmering,
        Species::Glistening,
        Species::Vibrant,
    ];

    /// Object id of the shoal's click box, used to classify a spawned object.
    pub const fn kind_code(self) -> u32 {
        match self {
            Species::GiantKrill => 59734,
            Species::Haddock => 59735,
            Species::Yellowfin => 59736,
            Species::Halibut => 59737,
            Species::Bluefin => 59738,
            Species::Marlin => 59739,
            Species::Shimmering => 59740,
            Species::Glistening => 59741,
            Species::Vibrant => 59742,
        }
    }

    pub const fn allowed_depths(self) -> DepthSet {
        match self {
            Species::GiantKrill | Species::Shimmering => DepthSet::single(Depth::Shallow),
            Species::Haddock | Species::Yellowfin => {
                DepthSet::of(&[Depth::Shallow, Depth::Medium])
            }
            Species::Halibut | Species::Bluefin | Species::Marlin => {
                DepthSet::of(&[Depth::Medium, Depth::Deep])
            }
            Species::Glistening | Species::Vibrant => {
                DepthSet::of(&[Depth::Shallow, Depth::Medium, Depth::Deep])
            }
        }
    }

    pub const fn default_depth(self) -> Depth {
        match self {
            Species::GiantKrill | Species::Haddock | Species::Shimmering => Depth::Shallow,
            _ => Depth::Medium,
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Species::GiantKrill => "Giant Krill Shoal",
            Species::Haddock => "Haddock Shoal",
            Species::Yellowfin => "Yellowfin Shoal",
            Species::Halibut => "Halibut Shoal",
            Species::Bluefin => "Bluefin Shoal",
            Species::Marlin => "Marlin Shoal",
            Species::Shimmering => "Shimmering Shoal",
            Species::Glistening => "Glistening Shoal",
            Species::Vibrant => "Vibrant Shoal",
        }
    }

    /// Highlight colour as `0xRRGGBB`.
    pub const fn rgb(self) -> u32 {
        match self {
            Species::GiantKrill => 0xFF7878,
            Species::Haddock => 0xC8C8FF,
            Species::Yellowfin => 0xFFFF78,
            Species::Halibut => 0xC8FFC8,
            Species::Bluefin => 0x7890FF,
            Species::Marlin => 0xFFB450,
            Species::Shimmering => 0xAAFFFF,
            Species::Glistening => 0xC8FFF0,
            Species::Vibrant => 0xDCFFC8,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
