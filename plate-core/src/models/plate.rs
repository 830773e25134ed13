closed_enum! {
    /// One of the three fixed slots of a plate
    PlateSection("plate section") {
        /// The large portion
        Large => "large",
        /// The first small portion
        Small1 => "small1",
        /// The second small portion
        Small2 => "small2",
    }
}

impl PlateSection {
    /// The position of this section in a `[T; 3]` laid out as (large, small1, small2)
    pub fn index(self) -> usize {
        match self {
            Self::Large => 0,
            Self::Small1 => 1,
            Self::Small2 => 2,
        }
    }
}
