use {
    strum::EnumCount,
    strum_macros::{Display, EnumCount, EnumIter, IntoStaticStr},
};

/// Generation source. Declaration order is the stacking order of the fuel mix chart.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumCount,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum FuelType {
    Solar,
    Wind,
    Hydro,
    PowerStorage,
    Other,
    NaturalGas,
    CoalAndLignite,
    Nuclear,
}

impl FuelType {
    pub const ALL: [FuelType; FuelType::COUNT] = [
        FuelType::Solar,
        FuelType::Wind,
        FuelType::Hydro,
        FuelType::PowerStorage,
        FuelType::Other,
        FuelType::NaturalGas,
        FuelType::CoalAndLignite,
        FuelType::Nuclear,
    ];

    /// Column name in the fuel mix CSV, also the highlight identifier.
    pub fn key(self) -> &'static str {
        self.into()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Does a highlight identifier refer to this fuel?
    pub fn matches(self, key: &str) -> bool {
        self.key() == key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn keys_follow_csv_column_names() {
        assert_eq!(FuelType::PowerStorage.key(), "power_storage");
        assert_eq!(FuelType::CoalAndLignite.key(), "coal_and_lignite");
        assert_eq!(FuelType::NaturalGas.to_string(), "natural_gas");
    }

    #[test]
    fn all_is_in_stacking_order() {
        let iterated: Vec<FuelType> = FuelType::iter().collect();
        assert_eq!(iterated, FuelType::ALL.to_vec());
        for (i, fuel) in FuelType::ALL.iter().enumerate() {
            assert_eq!(fuel.index(), i);
        }
    }

    #[test]
    fn unknown_key_is_not_a_fuel() {
        assert!(FuelType::Wind.matches("wind"));
        assert!(FuelType::iter().all(|f| !f.matches("geothermal")));
    }
}
