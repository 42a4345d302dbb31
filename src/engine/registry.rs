// Tag lookup over a bevy_ecs World.

use bevy_ecs::prelude::*;

use super::components::Tag;
use crate::detector::WorldRegistry;

impl WorldRegistry for World {
    fn find_entities_by_tag(&self, tag: &str) -> Vec<Entity> {
        self.iter_entities()
            .filter(|entity| entity.get::<Tag>().is_some_and(|t| t.0 == tag))
            .map(|entity| entity.id())
            .collect()
    }
}
