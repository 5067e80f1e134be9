//! Image assets and what uses them

use crate::sim::{Character, GemKind};

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    StoneBlock,
    WaterBlock,
    GrassBlock,
    WoodBlock,
    EnemyBug,
    CharBoy,
    CharCatGirl,
    CharHornGirl,
    CharPinkGirl,
    CharPrincessGirl,
    Rock,
    GemBlue,
    GemGreen,
    GemOrange,
    Logo,
    Star,
    ScoreBoard,
}

impl Sprite {
    /// Load list; the game starts once all of these are ready
    pub const ALL: [Sprite; 17] = [
        Sprite::StoneBlock,
        Sprite::WaterBlock,
        Sprite::GrassBlock,
        Sprite::WoodBlock,
        Sprite::EnemyBug,
        Sprite::CharBoy,
        Sprite::CharCatGirl,
        Sprite::CharHornGirl,
        Sprite::CharPinkGirl,
        Sprite::CharPrincessGirl,
        Sprite::Rock,
        Sprite::GemBlue,
        Sprite::GemGreen,
        Sprite::GemOrange,
        Sprite::Logo,
        Sprite::Star,
        Sprite::ScoreBoard,
    ];

    /// URL relative to the host page
    pub fn path(self) -> &'static str {
        match self {
            Sprite::StoneBlock => "images/stone-block.png",
            Sprite::WaterBlock => "images/water-block.png",
            Sprite::GrassBlock => "images/grass-block.png",
            Sprite::WoodBlock => "images/wood-block.png",
            Sprite::EnemyBug => "images/enemy-bug.png",
            Sprite::CharBoy => "images/char-boy.png",
            Sprite::CharCatGirl => "images/char-cat-girl.png",
            Sprite::CharHornGirl => "images/char-horn-girl.png",
            Sprite::CharPinkGirl => "images/char-pink-girl.png",
            Sprite::CharPrincessGirl => "images/char-princess-girl.png",
            Sprite::Rock => "images/Rock.png",
            Sprite::GemBlue => "images/Gem-Blue.png",
            Sprite::GemGreen => "images/Gem-Green.png",
            Sprite::GemOrange => "images/Gem-Orange.png",
            Sprite::Logo => "images/frogger-logo.png",
            Sprite::Star => "images/Star.png",
            Sprite::ScoreBoard => "images/score-board.jpg",
        }
    }

    pub fn for_character(character: Character) -> Self {
        match character {
            Character::Boy => Sprite::CharBoy,
            Character::CatGirl => Sprite::CharCatGirl,
            Character::HornGirl => Sprite::CharHornGirl,
            Character::PinkGirl => Sprite::CharPinkGirl,
            Character::Princess => Sprite::CharPrincessGirl,
        }
    }

    pub fn for_gem(kind: GemKind) -> Self {
        match kind {
            GemKind::Blue => Sprite::GemBlue,
            GemKind::Green => Sprite::GemGreen,
            GemKind::Orange => Sprite::GemOrange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_unique() {
        let paths: HashSet<_> = Sprite::ALL.iter().map(|s| s.path()).collect();
        assert_eq!(paths.len(), Sprite::ALL.len());
    }

    #[test]
    fn test_entity_sprites_are_loaded() {
        for character in Character::ALL {
            assert!(Sprite::ALL.contains(&Sprite::for_character(character)));
        }
        for kind in GemKind::ALL {
            assert!(Sprite::ALL.contains(&Sprite::for_gem(kind)));
        }
    }
}
