use crate::snake::Position;

/// Side effect triggered when a food is eaten.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodEffect {
    None,
    /// Speeds up the tick interval for a few seconds of real time.
    TemporarySpeedBoost,
    /// Cuts segments off the tail, never below the minimum length.
    ShrinkTail,
}

/// Food type and associated metadata.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodKind {
    Normal,
    Speed,
    Bonus,
    Shrink,
}

/// Spawn weights in draw order. The weights sum to exactly 1.0.
pub const FOOD_TABLE: [(FoodKind, f64); 4] = [
    (FoodKind::Normal, 0.7),
    (FoodKind::Speed, 0.1),
    (FoodKind::Bonus, 0.1),
    (FoodKind::Shrink, 0.1),
];

impl FoodKind {
    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            Self::Normal => 10,
            Self::Speed => 20,
            Self::Bonus => 30,
            Self::Shrink => 15,
        }
    }

    #[must_use]
    pub fn effect(self) -> FoodEffect {
        match self {
            Self::Normal | Self::Bonus => FoodEffect::None,
            Self::Speed => FoodEffect::TemporarySpeedBoost,
            Self::Shrink => FoodEffect::ShrinkTail,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Speed => "speed",
            Self::Bonus => "bonus",
            Self::Shrink => "shrink",
        }
    }
}

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    #[must_use]
    pub fn new(position: Position, kind: FoodKind) -> Self {
        Self { position, kind }
    }

    /// Creates a normal food at `position`.
    #[must_use]
    pub fn normal(position: Position) -> Self {
        Self::new(position, FoodKind::Normal)
    }

    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        self.kind.points()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{FOOD_TABLE, Food, FoodEffect, FoodKind};
    use crate::snake::Position;

    #[rstest]
    #[case(FoodKind::Normal, 10, FoodEffect::None)]
    #[case(FoodKind::Speed, 20, FoodEffect::TemporarySpeedBoost)]
    #[case(FoodKind::Bonus, 30, FoodEffect::None)]
    #[case(FoodKind::Shrink, 15, FoodEffect::ShrinkTail)]
    fn kind_metadata(#[case] kind: FoodKind, #[case] points: u32, #[case] effect: FoodEffect) {
        assert_eq!(kind.points(), points);
        assert_eq!(kind.effect(), effect);
    }

    #[test]
    fn table_weights_sum_to_one() {
        let total: f64 = FOOD_TABLE.iter().map(|(_, weight)| weight).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn table_is_declared_normal_first() {
        let order: Vec<FoodKind> = FOOD_TABLE.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(
            order,
            vec![
                FoodKind::Normal,
                FoodKind::Speed,
                FoodKind::Bonus,
                FoodKind::Shrink
            ]
        );
    }

    #[test]
    fn food_points_follow_kind() {
        let food = Food::new(Position::new(1, 1), FoodKind::Bonus);
        assert_eq!(food.points(), 30);
        assert_eq!(Food::normal(Position::new(2, 2)).points(), 10);
    }
}
