//! Fate, resilience, experience and movement counters.

use serde::{Deserialize, Serialize};

use crate::aggregates::{Experience, Movement, Pool};
use crate::editors::input::int_or;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolField {
    Total,
    Current,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceField {
    Current,
    Spent,
    Total,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementField {
    Move,
    Walk,
    Run,
}

pub fn edit_pool(pool: &Pool, field: PoolField, input: &str) -> Pool {
    let value = int_or(input, 0);
    let mut next = *pool;
    match field {
        PoolField::Total => next.total = value,
        PoolField::Current => next.current = value,
    }
    next
}

pub fn edit_experience(xp: &Experience, field: ExperienceField, input: &str) -> Experience {
    let value = int_or(input, 0);
    let mut next = *xp;
    match field {
        ExperienceField::Current => next.current = value,
        ExperienceField::Spent => next.spent = value,
        ExperienceField::Total => next.total = value,
    }
    next
}

/// Walk and run are edited like any other counter; nothing is derived from move.
pub fn edit_movement(movement: &Movement, field: MovementField, input: &str) -> Movement {
    let value = int_or(input, 0);
    let mut next = *movement;
    match field {
        MovementField::Move => next.move_rate = value,
        MovementField::Walk => next.walk = value,
        MovementField::Run => next.run = value,
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_fields_edit_independently() {
        let fate = Pool::full(3);
        assert_eq!(edit_pool(&fate, PoolField::Current, "1"), Pool { total: 3, current: 1 });
        assert_eq!(edit_pool(&fate, PoolField::Total, "?"), Pool { total: 0, current: 3 });
    }

    #[test]
    fn movement_does_not_rederive_walk() {
        let movement = Movement { move_rate: 4, walk: 8, run: 16 };
        let next = edit_movement(&movement, MovementField::Move, "5");
        assert_eq!(next, Movement { move_rate: 5, walk: 8, run: 16 });
    }

    #[test]
    fn experience_spent() {
        let xp = edit_experience(&Experience::default(), ExperienceField::Spent, "250");
        assert_eq!(xp.spent, 250);
        assert_eq!(xp.total, 0);
    }
}
