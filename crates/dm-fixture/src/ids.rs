//! Deterministic fixture identifiers
//!
//! Well-known entities use fixed UUIDs of the form
//! `00000000-0000-4000-GGGG-NNNNNNNNNNNN`, where `GGGG` selects the entity
//! group and the trailing node holds the sequence number written in decimal
//! digits (task 12 is `...-8002-000000000012`). Tests and manual requests can
//! hard-code these ids.

use uuid::Uuid;

const USER_GROUP: u16 = 0x8001;
const TASK_GROUP: u16 = 0x8002;
const ITERATION_GROUP: u16 = 0x8003;

/// Id of the canonical `meteor` user
pub const METEOR_USER_ID: Uuid = fixture_uuid(USER_GROUP, 0);

/// Id of the `n`th seeded task
pub const fn task_id(n: u32) -> Uuid {
    fixture_uuid(TASK_GROUP, n)
}

/// Id of the `n`th seeded iteration
pub const fn iteration_id(n: u32) -> Uuid {
    fixture_uuid(ITERATION_GROUP, n)
}

/// Build `00000000-0000-4000-<group>-<n as decimal digits>`.
const fn fixture_uuid(group: u16, n: u32) -> Uuid {
    let mut node: u128 = 0;
    let mut shift = 0;
    let mut rest = n;
    while rest > 0 {
        node |= ((rest % 10) as u128) << shift;
        shift += 4;
        rest /= 10;
    }
    Uuid::from_u128((0x4000u128 << 64) | ((group as u128) << 48) | node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meteor_id() {
        assert_eq!(
            METEOR_USER_ID.to_string(),
            "00000000-0000-4000-8001-000000000000"
        );
    }

    #[test]
    fn test_sequence_numbers_read_as_decimal() {
        assert_eq!(
            task_id(1).to_string(),
            "00000000-0000-4000-8002-000000000001"
        );
        assert_eq!(
            task_id(12).to_string(),
            "00000000-0000-4000-8002-000000000012"
        );
        assert_eq!(
            iteration_id(2).to_string(),
            "00000000-0000-4000-8003-000000000002"
        );
        assert_eq!(
            task_id(4_000_000_000).to_string(),
            "00000000-0000-4000-8002-004000000000"
        );
    }

    #[test]
    fn test_groups_do_not_collide() {
        assert_ne!(task_id(1), iteration_id(1));
        assert_ne!(task_id(0), METEOR_USER_ID);
    }
}
