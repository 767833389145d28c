//! Tire-trail markers left behind the vehicle.
//!
//! Each tick fades every live marker by a fixed step and retires those that
//! reach zero opacity, then drops a fresh pair behind the rear wheels while
//! the vehicle is moving. The emitter only tracks state; the renderer turns
//! emit/retire events into decals.

use bevy::prelude::*;

use super::motion::VehicleState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrailSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailMarker {
    pub id: u64,
    pub side: TrailSide,
    pub position: Vec3,
    pub opacity: f32,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TrailSettings {
    pub enabled: bool,
    /// Opacity lost per tick.
    pub fade_step: f32,
    /// No markers below this `|speed|`.
    pub min_speed: f32,
    /// Distance from the vehicle position back to the rear axle.
    pub rear_offset: f32,
    /// Half the distance between the rear wheels.
    pub half_track: f32,
    /// Height the markers sit at.
    pub ground_y: f32,
}

impl Default for TrailSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            fade_step: 0.02,
            min_speed: 0.01,
            rear_offset: 1.2,
            half_track: 0.7,
            ground_y: 0.14,
        }
    }
}

/// What changed during one emitter tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrailEvents {
    pub emitted: Vec<TrailMarker>,
    pub retired: Vec<u64>,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct TrailEmitter {
    pub settings: TrailSettings,
    markers: Vec<TrailMarker>,
    next_id: u64,
}

impl TrailEmitter {
    pub fn new(settings: TrailSettings) -> Self {
        Self {
            settings,
            markers: Vec::new(),
            next_id: 0,
        }
    }

    /// Live markers, oldest first.
    pub fn markers(&self) -> &[TrailMarker] {
        &self.markers
    }

    pub fn opacity(&self, id: u64) -> Option<f32> {
        self.markers.iter().find(|m| m.id == id).map(|m| m.opacity)
    }

    pub fn tick(&mut self, vehicle: &VehicleState) -> TrailEvents {
        let mut events = TrailEvents::default();
        let fade = self.settings.fade_step;

        self.markers.retain_mut(|marker| {
            marker.opacity -= fade;
            if marker.opacity <= 0.0 {
                events.retired.push(marker.id);
                false
            } else {
                true
            }
        });

        if !self.settings.enabled || vehicle.speed.abs() < self.settings.min_speed {
            return events;
        }

        let ground = Vec3::new(vehicle.position.x, self.settings.ground_y, vehicle.position.z);
        let rear = ground - vehicle.forward() * self.settings.rear_offset;
        let across = vehicle.right() * self.settings.half_track;

        for (side, position) in [
            (TrailSide::Left, rear - across),
            (TrailSide::Right, rear + across),
        ] {
            let marker = TrailMarker {
                id: self.next_id,
                side,
                position,
                opacity: 1.0,
            };
            self.next_id += 1;
            self.markers.push(marker);
            events.emitted.push(marker);
        }
        events
    }
}
