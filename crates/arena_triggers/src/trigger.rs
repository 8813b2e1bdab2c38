//! Trigger definitions

use arena_math::{consts::TAU, Vec3};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Point written as `{ "x": .., "y": .., "z": .. }`
#[derive(Serialize, Deserialize)]
struct Point {
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    z: f32,
}

fn serialize_point<S: Serializer>(v: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
    Point { x: v.x, y: v.y, z: v.z }.serialize(serializer)
}

fn deserialize_point<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
    let p = Point::deserialize(deserializer)?;
    Ok(Vec3::new(p.x, p.y, p.z))
}

fn default_message_ms() -> u32 {
    3000
}

fn default_volume() -> f32 {
    1.0
}

fn default_count() -> u32 {
    1
}

fn default_offset() -> f32 {
    5.0
}

/// When a trigger fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerCondition {
    /// Player within `radius` of `position` (3D distance)
    Area {
        #[serde(serialize_with = "serialize_point", deserialize_with = "deserialize_point")]
        position: Vec3,
        radius: f32,
    },
    /// Session time at or past `value` seconds
    Time { value: f32 },
}

impl TriggerCondition {
    /// Check the condition against the player position and session time
    pub fn is_met(&self, player_position: Vec3, elapsed: f32) -> bool {
        match self {
            Self::Area { position, radius } => player_position.distance(*position) < *radius,
            Self::Time { value } => elapsed >= *value,
        }
    }
}

/// One step of a trigger's response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerAction {
    /// Show a HUD message
    Message {
        text: String,
        /// Milliseconds on screen
        #[serde(default = "default_message_ms")]
        duration: u32,
    },
    /// Play a non-spatial sound
    Sound {
        id: String,
        #[serde(default = "default_volume")]
        volume: f32,
    },
    /// Spawn enemies on a ring around the player
    Spawn {
        /// Enemy type; a random type when absent
        #[serde(rename = "enemyType", default)]
        enemy_type: Option<String>,
        #[serde(default = "default_count")]
        count: u32,
        /// Ring radius
        #[serde(default = "default_offset")]
        offset: f32,
    },
    /// Tint the world for a while
    LightFlash {
        /// 0xRRGGBB
        color: u32,
        /// Milliseconds before the tint reverts
        duration: u32,
    },
}

/// Positions at random angles on a ring of radius `offset` around `center`, at `height`
pub fn ring_positions<R: Rng + ?Sized>(
    center: Vec3,
    offset: f32,
    count: u32,
    height: f32,
    rng: &mut R,
) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let angle = rng.gen_range(0.0..TAU);
            Vec3::new(center.x + angle.cos() * offset, height, center.z + angle.sin() * offset)
        })
        .collect()
}

/// A one-shot trigger: a condition and the actions it runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTrigger {
    /// Unique identifier, also the fired-set key
    pub id: String,
    /// Firing condition
    pub trigger: TriggerCondition,
    /// Actions in execution order
    #[serde(default)]
    pub actions: Vec<TriggerAction>,
}

impl EventTrigger {
    /// Create a trigger with no actions
    pub fn new(id: impl Into<String>, condition: TriggerCondition) -> Self {
        Self {
            id: id.into(),
            trigger: condition,
            actions: Vec::new(),
        }
    }

    /// Append an action
    pub fn with_action(mut self, action: TriggerAction) -> Self {
        self.actions.push(action);
        self
    }

    /// The two triggers every session starts with
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(
                "ambush_01",
                TriggerCondition::Area {
                    position: Vec3::new(0.0, 0.0, 20.0),
                    radius: 5.0,
                },
            )
            .with_action(TriggerAction::Message {
                text: "It's a trap!".into(),
                duration: 3000,
            })
            .with_action(TriggerAction::Sound {
                id: "roar1".into(),
                volume: 1.0,
            })
            .with_action(TriggerAction::Spawn {
                enemy_type: Some("pablo".into()),
                count: 2,
                offset: 5.0,
            })
            .with_action(TriggerAction::LightFlash {
                color: 0xff0000,
                duration: 500,
            }),
            Self::new("creepy_atmosphere", TriggerCondition::Time { value: 10.0 })
                .with_action(TriggerAction::Message {
                    text: "Something watches you from the dark...".into(),
                    duration: 4000,
                })
                .with_action(TriggerAction::Sound {
                    id: "hiss1".into(),
                    volume: 0.8,
                }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_area_condition_uses_full_distance() {
        let area = TriggerCondition::Area {
            position: Vec3::new(0.0, 0.0, 20.0),
            radius: 5.0,
        };
        assert!(area.is_met(Vec3::new(0.0, 2.0, 18.0), 0.0));
        assert!(!area.is_met(Vec3::new(0.0, 2.0, 26.0), 0.0));
    }

    #[test]
    fn test_time_condition() {
        let time = TriggerCondition::Time { value: 10.0 };
        assert!(!time.is_met(Vec3::ZERO, 9.9));
        assert!(time.is_met(Vec3::ZERO, 10.0));
    }

    #[test]
    fn test_action_json_defaults() {
        let json = r#"[
            {"type": "MESSAGE", "text": "hi"},
            {"type": "SPAWN", "count": 3},
            {"type": "LIGHT_FLASH", "color": 16711680, "duration": 500}
        ]"#;
        let actions: Vec<TriggerAction> = serde_json::from_str(json).unwrap();
        assert_eq!(
            actions[0],
            TriggerAction::Message {
                text: "hi".into(),
                duration: 3000
            }
        );
        assert_eq!(
            actions[1],
            TriggerAction::Spawn {
                enemy_type: None,
                count: 3,
                offset: 5.0
            }
        );
        assert!(matches!(actions[2], TriggerAction::LightFlash { color: 0xff0000, .. }));
    }

    #[test]
    fn test_ring_positions() {
        let mut rng = StdRng::seed_from_u64(1);
        let center = Vec3::new(10.0, 2.0, -4.0);
        let positions = ring_positions(center, 5.0, 4, 1.0, &mut rng);

        assert_eq!(positions.len(), 4);
        for p in positions {
            assert_relative_eq!(arena_math::horizontal_distance(p, center), 5.0, epsilon = 1e-4);
            assert_eq!(p.y, 1.0);
        }
    }
}
