// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The closed set of selectors ("who" designators).
//!
//! Resolve-eligible selectors come first; [`Selector::NORESOLVE_START`]
//! is the first selector a random resolve search may not draw.

use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString, FromRepr, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumCountMacro,
    EnumString,
    Display,
    IntoStaticStr,
    FromRepr,
)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Selector {
    Boys,
    Girls,
    Heads,
    Sides,
    #[strum(serialize = "headcorners")]
    HeadCorners,
    #[strum(serialize = "sidecorners")]
    SideCorners,
    #[strum(serialize = "headboys")]
    HeadBoys,
    #[strum(serialize = "headgirls")]
    HeadGirls,
    #[strum(serialize = "sideboys")]
    SideBoys,
    #[strum(serialize = "sidegirls")]
    SideGirls,
    Centers,
    Ends,
    Leads,
    Trailers,
    LeadBeaus,
    LeadBelles,
    LeadEnds,
    #[strum(serialize = "lead_ctrs")]
    LeadCenters,
    TrailBeaus,
    TrailBelles,
    TrailEnds,
    #[strum(serialize = "trail_ctrs")]
    TrailCenters,
    EndBoys,
    EndGirls,
    CenterBoys,
    CenterGirls,
    Beaus,
    Belles,
    #[strum(serialize = "center2")]
    Center2,
    #[strum(serialize = "verycenters")]
    VeryCenters,
    #[strum(serialize = "center6")]
    Center6,
    #[strum(serialize = "outer2")]
    Outer2,
    #[strum(serialize = "veryends")]
    VeryEnds,
    #[strum(serialize = "outer6")]
    Outer6,
    #[strum(serialize = "ctrdmd")]
    CtrDmd,
    #[strum(serialize = "ctr_1x4")]
    Ctr1x4,
    #[strum(serialize = "ctr_1x6")]
    Ctr1x6,
    #[strum(serialize = "outer1x3s")]
    Outer1x3s,
    #[strum(serialize = "center4")]
    Center4,
    CenterWave,
    CenterLine,
    CenterCol,
    CenterBox,
    #[strum(serialize = "center_wave_of_6")]
    CenterWaveOf6,
    #[strum(serialize = "center_line_of_6")]
    CenterLineOf6,
    #[strum(serialize = "center_col_of_6")]
    CenterColOf6,
    #[strum(serialize = "outerpairs")]
    OuterPairs,
    #[strum(serialize = "firstone")]
    FirstOne,
    #[strum(serialize = "lastone")]
    LastOne,
    #[strum(serialize = "firsttwo")]
    FirstTwo,
    #[strum(serialize = "lasttwo")]
    LastTwo,
    #[strum(serialize = "firstthree")]
    FirstThree,
    #[strum(serialize = "lastthree")]
    LastThree,
    #[strum(serialize = "firstfour")]
    FirstFour,
    #[strum(serialize = "lastfour")]
    LastFour,
    #[strum(serialize = "leftmostone")]
    LeftmostOne,
    #[strum(serialize = "rightmostone")]
    RightmostOne,
    #[strum(serialize = "leftmosttwo")]
    LeftmostTwo,
    #[strum(serialize = "rightmosttwo")]
    RightmostTwo,
    #[strum(serialize = "leftmostthree")]
    LeftmostThree,
    #[strum(serialize = "rightmostthree")]
    RightmostThree,
    #[strum(serialize = "leftmostfour")]
    LeftmostFour,
    #[strum(serialize = "rightmostfour")]
    RightmostFour,
    #[strum(serialize = "headliners")]
    HeadLiners,
    #[strum(serialize = "sideliners")]
    SideLiners,
    #[strum(serialize = "thosefacing")]
    ThoseFacing,
    Everyone,
    All,
    #[strum(serialize = "none")]
    Nobody,
    // Not eligible for random resolves from here on.
    #[strum(serialize = "the2x3")]
    The2x3,
    #[strum(serialize = "thediamond")]
    TheDiamond,
    #[strum(serialize = "theline")]
    TheLine,
    #[strum(serialize = "thecolumn")]
    TheColumn,
    #[strum(serialize = "nearline")]
    NearLine,
    #[strum(serialize = "farline")]
    FarLine,
    #[strum(serialize = "leftline")]
    LeftLine,
    #[strum(serialize = "rightline")]
    RightLine,
    #[strum(serialize = "nearcolumn")]
    NearColumn,
    #[strum(serialize = "farcolumn")]
    FarColumn,
    #[strum(serialize = "leftcolumn")]
    LeftColumn,
    #[strum(serialize = "rightcolumn")]
    RightColumn,
    #[strum(serialize = "nearbox")]
    NearBox,
    #[strum(serialize = "farbox")]
    FarBox,
    #[strum(serialize = "leftbox")]
    LeftBox,
    #[strum(serialize = "rightbox")]
    RightBox,
    #[strum(serialize = "facingfront")]
    FacingFront,
    #[strum(serialize = "facingback")]
    FacingBack,
    #[strum(serialize = "facingleft")]
    FacingLeft,
    #[strum(serialize = "facingright")]
    FacingRight,
    #[strum(serialize = "boy1")]
    Boy1,
    #[strum(serialize = "girl1")]
    Girl1,
    #[strum(serialize = "cpl1")]
    Couple1,
    #[strum(serialize = "boy2")]
    Boy2,
    #[strum(serialize = "girl2")]
    Girl2,
    #[strum(serialize = "cpl2")]
    Couple2,
    #[strum(serialize = "boy3")]
    Boy3,
    #[strum(serialize = "girl3")]
    Girl3,
    #[strum(serialize = "cpl3")]
    Couple3,
    #[strum(serialize = "boy4")]
    Boy4,
    #[strum(serialize = "girl4")]
    Girl4,
    #[strum(serialize = "cpl4")]
    Couple4,
    #[strum(serialize = "cpls1_2")]
    Couples12,
    #[strum(serialize = "cpls2_3")]
    Couples23,
    #[strum(serialize = "cpls3_4")]
    Couples34,
    #[strum(serialize = "cpls4_1")]
    Couples41,
    #[strum(serialize = "some")]
    SomeGroup,
    #[strum(serialize = "mysticbeaus")]
    MysticBeaus,
    #[strum(serialize = "mysticbelles")]
    MysticBelles,
    #[strum(serialize = "notctrdmd")]
    NotCtrDmd,
    #[strum(serialize = "inside_tgl")]
    InsideTriangles,
    #[strum(serialize = "outside_tgl")]
    OutsideTriangles,
    #[strum(serialize = "inpoint_tgl")]
    InpointTriangles,
    #[strum(serialize = "outpoint_tgl")]
    OutpointTriangles,
    #[strum(serialize = "beaupoint_tgl")]
    BeaupointTriangles,
    #[strum(serialize = "bellepoint_tgl")]
    BellepointTriangles,
    #[strum(serialize = "wave_base_tgl")]
    WaveBasedTriangles,
    #[strum(serialize = "tand_base_tgl")]
    TandemBasedTriangles,
    #[strum(serialize = "anyone_base_tgl")]
    AnyoneBasedTriangles,
}

impl Selector {
    /// First selector that random resolve searches never draw.
    pub const NORESOLVE_START: Selector = Selector::The2x3;

    /// True for selectors in the resolve-eligible prefix.
    pub fn is_resolve_eligible(self) -> bool {
        self < Self::NORESOLVE_START
    }

    /// Number of resolve-eligible selectors.
    pub const fn resolve_eligible_count() -> usize {
        Self::NORESOLVE_START as usize
    }

    /// The selector at position `index` in declaration order.
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().and_then(Self::from_repr)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Selectors whose meaning is fixed by slot alone, so an empty slot can
    /// be judged from the setup's positional role table.
    pub fn is_positional(self) -> bool {
        use Selector::*;
        matches!(
            self,
            Centers
                | Ends
                | Center2
                | Outer6
                | VeryCenters
                | Center6
                | Outer2
                | VeryEnds
                | CtrDmd
                | Ctr1x4
                | Ctr1x6
                | Outer1x3s
                | Center4
                | CenterWave
                | CenterLine
                | CenterCol
                | CenterWaveOf6
                | CenterLineOf6
                | CenterColOf6
                | CenterBox
                | OuterPairs
        )
    }

    /// Selectors naming half of a 2x4 by where it stands in the hall.
    pub fn is_proximity(self) -> bool {
        (Selector::NearLine..=Selector::RightBox).contains(&self)
    }

    /// Selectors naming triangles by their shape.
    pub fn is_triangle(self) -> bool {
        (Selector::InsideTriangles..=Selector::AnyoneBasedTriangles).contains(&self)
    }

    /// Unsymmetrical selectors name specific dancers by couple number.
    pub fn is_unsymmetrical(self) -> bool {
        (Selector::Boy1..=Selector::Couples41).contains(&self)
    }

    /// Selectors that pick dancers by their facing relative to the hall.
    pub fn needs_precise_rotation(self) -> bool {
        matches!(
            self,
            Selector::HeadLiners
                | Selector::SideLiners
                | Selector::FacingFront
                | Selector::FacingBack
                | Selector::FacingLeft
                | Selector::FacingRight
        ) || self.is_proximity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn test_names_parse_back() {
        for selector in Selector::iter() {
            assert_eq!(Selector::from_str(selector.name()), Ok(selector));
        }
        assert_eq!(Selector::from_str("lead_ctrs"), Ok(Selector::LeadCenters));
        assert_eq!(Selector::Couples41.to_string(), "cpls4_1");
        assert_eq!(Selector::CenterWaveOf6.to_string(), "center_wave_of_6");
    }

    #[test]
    fn test_resolve_prefix() {
        assert!(Selector::Nobody.is_resolve_eligible());
        assert!(!Selector::The2x3.is_resolve_eligible());
        assert!(!Selector::SomeGroup.is_resolve_eligible());
        assert_eq!(
            Selector::iter().filter(|s| s.is_resolve_eligible()).count(),
            Selector::resolve_eligible_count()
        );
    }

    #[test]
    fn test_index_round_trip() {
        for selector in Selector::iter() {
            assert_eq!(Selector::from_index(selector.index()), Some(selector));
        }
        assert_eq!(Selector::from_index(Selector::COUNT), None);
    }

    #[test]
    fn test_proximity_and_triangle_ranges() {
        assert_eq!(Selector::iter().filter(|s| s.is_proximity()).count(), 12);
        assert_eq!(Selector::iter().filter(|s| s.is_triangle()).count(), 9);
        assert!(!Selector::NearLine.is_resolve_eligible());
        assert_eq!(Selector::from_str("nearbox"), Ok(Selector::NearBox));
        assert_eq!(Selector::WaveBasedTriangles.to_string(), "wave_base_tgl");
    }

    #[test]
    fn test_unsymmetrical_range() {
        assert!(Selector::Boy1.is_unsymmetrical());
        assert!(Selector::Couples41.is_unsymmetrical());
        assert!(!Selector::SomeGroup.is_unsymmetrical());
        assert_eq!(Selector::iter().filter(|s| s.is_unsymmetrical()).count(), 16);
    }
}
