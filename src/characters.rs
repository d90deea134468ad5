use once_cell::sync::Lazy;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: u32,
    pub name: &'static str,
    pub sprite: &'static str,
}

/// Playable roster, also the sprite pool mobs draw from
static ROSTER: Lazy<Vec<Character>> = Lazy::new(|| {
    let roster = vec![
        Character {
            id: 0,
            name: "Joao",
            sprite: "assets/player/joao.png",
        },
        Character {
            id: 1,
            name: "Magic",
            sprite: "assets/player/magic.png",
        },
        Character {
            id: 2,
            name: "Nugget",
            sprite: "assets/player/bear.png",
        },
        Character {
            id: 3,
            name: "Wus",
            sprite: "assets/player/robot.png",
        },
        Character {
            id: 4,
            name: "Joana",
            sprite: "assets/player/joao.png",
        },
    ];
    if let Some(id) = duplicate_id(&roster) {
        error!("Duplicate character id {} in roster, ids must be unique", id);
    }
    roster
});

pub fn roster() -> &'static [Character] {
    &ROSTER
}

/// Unknown ids fall back to the first character
pub fn find(id: u32) -> &'static Character {
    roster()
        .iter()
        .find(|character| character.id == id)
        .unwrap_or(&ROSTER[0])
}

/// Every distinct sprite in the roster, in roster order
pub fn sprite_pool() -> Vec<&'static str> {
    let mut seen = HashSet::new();
    roster()
        .iter()
        .map(|character| character.sprite)
        .filter(|sprite| seen.insert(*sprite))
        .collect()
}

fn duplicate_id(roster: &[Character]) -> Option<u32> {
    let mut ids = HashSet::new();
    roster
        .iter()
        .map(|character| character.id)
        .find(|id| !ids.insert(*id))
}
