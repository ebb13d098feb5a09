//! Identifiers for sounds and actors.

use std::{fmt::Display, str::FromStr};

#[derive(thiserror::Error, Debug)]
#[error("Error converting to ID: {message}")]
pub struct IdConversionError {
    message: String,
}

macro_rules! sound_ids {
    ($($variant:ident => $name:literal,)*) => {
        /// A sound effect, numbered as the game numbers it.
        ///
        /// The first block are gameplay sounds which exist as digitized and
        /// synthesized versions. The intro sounds that follow only exist as
        /// digitized files of their own.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        pub enum SoundId {
            $($variant,)*
        }

        impl SoundId {
            pub const ALL: &[SoundId] = &[$(SoundId::$variant,)*];

            /// The kebab-case name of the sound, as accepted by [`FromStr`].
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $(SoundId::$variant => $name,)*
                }
            }
        }
    };
}

sound_ids! {
    BigExplosion => "big-explosion",
    DukeNormalShot => "duke-normal-shot",
    DukeLaserShot => "duke-laser-shot",
    DukeJumping => "duke-jumping",
    DukeLanding => "duke-landing",
    DukePain => "duke-pain",
    DukeDeath => "duke-death",
    DukeAttachClimbable => "duke-attach-climbable",
    ItemPickup => "item-pickup",
    HealthPickup => "health-pickup",
    WeaponPickup => "weapon-pickup",
    BonusCollected => "bonus-collected",
    EnemyHit => "enemy-hit",
    EnemyLaserShot => "enemy-laser-shot",
    FlameThrowerShot => "flame-thrower-shot",
    AlternateExplosion => "alternate-explosion",
    Swoosh => "swoosh",
    GlassBreaking => "glass-breaking",
    HammerSmash => "hammer-smash",
    SlidingDoor => "sliding-door",
    ForceFieldFizzle => "force-field-fizzle",
    FallingRock => "falling-rock",
    WaterDrop => "water-drop",
    LavaFountain => "lava-fountain",
    Teleport => "teleport",
    MenuSelect => "menu-select",
    MenuCancel => "menu-cancel",
    SmallExplosion => "small-explosion",
    RapidFireShot => "rapid-fire-shot",
    KeyCardInserted => "key-card-inserted",
    EarthQuake => "earth-quake",
    ShipEngine => "ship-engine",
    Footstep => "footstep",
    PlayerRespawn => "player-respawn",
    IntroGunShot => "intro-gun-shot",
    IntroGunShotLow => "intro-gun-shot-low",
    IntroEmptyShellsFalling => "intro-empty-shells-falling",
    IntroTargetMovingCloser => "intro-target-moving-closer",
    IntroTargetStopsMoving => "intro-target-stops-moving",
    IntroDukeSpeaks1 => "intro-duke-speaks-1",
    IntroDukeSpeaks2 => "intro-duke-speaks-2",
}

impl SoundId {
    #[must_use]
    pub fn number(self) -> u8 {
        self as u8
    }

    /// The dedicated file of an intro sound. Gameplay sounds have none.
    #[must_use]
    pub fn intro_file_name(self) -> Option<&'static str> {
        match self {
            SoundId::IntroGunShot => Some("INTRO3.MNI"),
            SoundId::IntroGunShotLow => Some("INTRO4.MNI"),
            SoundId::IntroEmptyShellsFalling => Some("INTRO5.MNI"),
            SoundId::IntroTargetMovingCloser => Some("INTRO6.MNI"),
            SoundId::IntroTargetStopsMoving => Some("INTRO7.MNI"),
            SoundId::IntroDukeSpeaks1 => Some("INTRO8.MNI"),
            SoundId::IntroDukeSpeaks2 => Some("INTRO9.MNI"),
            _ => None,
        }
    }

    /// The digitized version of a sound, `SB_<number + 1>.MNI`.
    #[must_use]
    pub fn digitized_file_name(self) -> String {
        format!("SB_{}.MNI", u16::from(self.number()) + 1)
    }
}

impl From<SoundId> for u8 {
    fn from(id: SoundId) -> Self {
        id.number()
    }
}

impl From<SoundId> for u16 {
    fn from(id: SoundId) -> Self {
        u16::from(id.number())
    }
}

impl TryFrom<u16> for SoundId {
    type Error = IdConversionError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        SoundId::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| IdConversionError {
                message: format!("Sound number {value} out of range"),
            })
    }
}

impl TryFrom<u8> for SoundId {
    type Error = IdConversionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SoundId::try_from(u16::from(value))
    }
}

impl Display for SoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SoundId {
    type Err = IdConversionError;

    /// Accepts either the sound's number or its kebab-case name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(number) = s.parse::<u16>() {
            return SoundId::try_from(number);
        }
        SoundId::ALL
            .iter()
            .copied()
            .find(|id| id.name() == s)
            .ok_or_else(|| IdConversionError {
                message: format!("Unknown sound: {s}"),
            })
    }
}

/// Identifies an actor (sprite) in the actor image package.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActorId(u16);

impl ActorId {
    #[must_use]
    pub fn new(id: u16) -> Self {
        ActorId(id)
    }

    #[must_use]
    pub fn number(&self) -> u16 {
        self.0
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "actor-{}", self.0)
    }
}

impl std::fmt::Debug for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ActorId").field(&self.0).finish()
    }
}

impl FromStr for ActorId {
    type Err = IdConversionError;

    /// Accepts `actor-<n>` or a bare number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s.strip_prefix("actor-").unwrap_or(s);
        let id = number.parse::<u16>().map_err(|_| IdConversionError {
            message: format!("Invalid actor ID: {s}"),
        })?;
        Ok(ActorId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sound_numbers_follow_declaration_order() {
        assert_eq!(SoundId::BigExplosion.number(), 0);
        assert_eq!(SoundId::PlayerRespawn.number(), 33);
        assert_eq!(SoundId::IntroGunShot.number(), 34);
        assert_eq!(SoundId::ALL.len(), 41);
        for (i, id) in SoundId::ALL.iter().enumerate() {
            assert_eq!(usize::from(id.number()), i);
        }
    }

    #[test]
    fn only_intro_sounds_have_dedicated_files() {
        let intro: Vec<_> = SoundId::ALL
            .iter()
            .filter_map(|id| id.intro_file_name())
            .collect();
        assert_eq!(
            intro,
            [
                "INTRO3.MNI",
                "INTRO4.MNI",
                "INTRO5.MNI",
                "INTRO6.MNI",
                "INTRO7.MNI",
                "INTRO8.MNI",
                "INTRO9.MNI"
            ]
        );
        assert_eq!(SoundId::DukeJumping.intro_file_name(), None);
    }

    #[test]
    fn digitized_name_is_one_based() {
        assert_eq!(SoundId::BigExplosion.digitized_file_name(), "SB_1.MNI");
        assert_eq!(SoundId::DukeJumping.digitized_file_name(), "SB_4.MNI");
    }

    #[test]
    fn sound_id_parsing() {
        assert_eq!("3".parse::<SoundId>().unwrap(), SoundId::DukeJumping);
        assert_eq!(
            "intro-gun-shot".parse::<SoundId>().unwrap(),
            SoundId::IntroGunShot
        );
        assert!("41".parse::<SoundId>().is_err());
        assert!("nonsense".parse::<SoundId>().is_err());
        for id in SoundId::ALL {
            assert_eq!(id.to_string().parse::<SoundId>().unwrap(), *id);
        }
    }

    #[test]
    fn actor_id_parsing() {
        assert_eq!("actor-159".parse::<ActorId>().unwrap(), ActorId::new(159));
        assert_eq!("12".parse::<ActorId>().unwrap(), ActorId::new(12));
        assert!("actor-x".parse::<ActorId>().is_err());
    }
}
