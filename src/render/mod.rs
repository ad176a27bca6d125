pub mod instance;

use glam::IVec2;

use self::instance::EntityView;
use crate::ecs::components::{Mouth, Player, Pursuer};
use crate::motion::MotionBody;

/// Everything the presentation layer needs after one tick. Rebuilt in place
/// every tick so the entity buffer is reused.
#[derive(Debug, Clone, Default)]
pub struct RenderFrame {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub best: u32,
    /// Overlay name of the current game state.
    pub state: &'static str,
    /// Set only on the tick the game state changed.
    pub state_changed: bool,
    /// Pellet tiles eaten this tick.
    pub eaten: Vec<IVec2>,
    pub pellets_left: usize,
    /// Player first, then pursuers in roster order.
    pub entities: Vec<EntityView>,
}

impl RenderFrame {
    /// Refill `entities` from the world.
    pub fn collect_entities(&mut self, world: &hecs::World) {
        self.entities.clear();

        for (_, (body, player, mouth)) in world.query::<(&MotionBody, &Player, &Mouth)>().iter() {
            self.entities.push(EntityView::from_player(body, player, mouth));
        }

        let first_pursuer = self.entities.len();
        for (_, (body, pursuer)) in world.query::<(&MotionBody, &Pursuer)>().iter() {
            self.entities.push(EntityView::from_pursuer(body, pursuer));
        }
        self.entities[first_pursuer..].sort_by_key(|view| match view.kind {
            instance::EntityKind::Pursuer(id) => id as u8,
            instance::EntityKind::Player => 0,
        });
    }

    /// The player's view, if the player exists.
    pub fn player(&self) -> Option<&EntityView> {
        self.entities
            .iter()
            .find(|view| view.kind == instance::EntityKind::Player)
    }
}
