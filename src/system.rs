use core::fmt;
use std::collections::HashMap;

use glam::DVec3;

use crate::{Body, BodyAddError, Clock, OrbitTrait as _};

/// The identifier of a body inside a [`System`].
pub type Id = u64;

/// Struct that represents a system of bodies orbiting each other,
/// driven by a [`Clock`].
///
/// # Example
/// ```
/// use halferth_orbits::{body_presets, Clock, System};
///
/// let mut system = System::new(Clock::new(1.0)?);
///
/// let halferth = system.add_body(body_presets::halferth(None)?, None)?;
/// let mother = system.add_body(body_presets::mother(), Some(halferth))?;
///
/// system.tick();
///
/// let position = system.get_body_position(mother).unwrap();
/// assert!(position.length() > 0.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct System {
    /// The celestial bodies in the system and their relations.
    bodies: HashMap<Id, BodyWrapper>,

    /// The next ID to assign to a body.
    next_id: Id,

    /// The simulated time driving every orbit.
    pub clock: Clock,
}

/// The parent and satellites of a body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BodyRelation {
    /// The body this one orbits, if any.
    pub parent: Option<Id>,
    /// The bodies orbiting this one.
    pub satellites: Vec<Id>,
}

#[derive(Clone, Debug, PartialEq)]
struct BodyWrapper {
    body: Body,
    relations: BodyRelation,
}

impl System {
    /// Creates an empty system driven by the given clock.
    pub fn new(clock: Clock) -> System {
        System {
            bodies: HashMap::new(),
            next_id: 0,
            clock,
        }
    }

    /// Adds a body to the system.
    /// `body`: The body to add into the system.
    /// `satellite_of`: The id of the body that this body is orbiting.
    /// Returns: The id of the newly-added body.
    pub fn add_body(&mut self, body: Body, satellite_of: Option<Id>) -> Result<Id, BodyAddError> {
        if let Some(parent_id) = satellite_of {
            if !self.bodies.contains_key(&parent_id) {
                return Err(BodyAddError::ParentNotFound(parent_id));
            }
        }

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        tracing::debug!(id, name = %body.name, parent = ?satellite_of, "adding body");

        self.bodies.insert(
            id,
            BodyWrapper {
                body,
                relations: BodyRelation {
                    parent: satellite_of,
                    satellites: Vec::new(),
                },
            },
        );
        if let Some(parent_id) = satellite_of {
            if let Some(wrapper) = self.bodies.get_mut(&parent_id) {
                wrapper.relations.satellites.push(id);
            }
        }

        Ok(id)
    }

    /// Removes a body from the system, along with everything orbiting it.
    ///
    /// `body_id`: The id of the body to remove.
    ///
    /// Returns: A Vec of all bodies that were removed, including the one specified.
    /// An empty Vec is returned if the body was not found.
    pub fn remove_body(&mut self, body_id: Id) -> Vec<Body> {
        let wrapper = match self.bodies.remove(&body_id) {
            Some(wrapper) => wrapper,
            None => return Vec::new(),
        };

        tracing::debug!(id = body_id, name = %wrapper.body.name, "removing body");

        let (body, relations) = (wrapper.body, wrapper.relations);
        let mut bodies = vec![body];

        if let Some(parent_id) = relations.parent {
            if let Some(parent_wrapper) = self.bodies.get_mut(&parent_id) {
                parent_wrapper
                    .relations
                    .satellites
                    .retain(|&satellite| satellite != body_id);
            }
        }

        for &satellite_id in &relations.satellites {
            bodies.append(&mut self.remove_body(satellite_id));
        }

        bodies
    }

    /// Gets the ids of all bodies in the system, in ascending order.
    pub fn get_body_ids(&self) -> Vec<Id> {
        let mut ids: Vec<Id> = self.bodies.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Gets an immutable reference to a body in the system.
    pub fn get_body(&self, id: Id) -> Option<&Body> {
        self.bodies.get(&id).map(|wrapper| &wrapper.body)
    }

    /// Gets a mutable reference to a body in the system.
    pub fn get_body_mut(&mut self, id: Id) -> Option<&mut Body> {
        self.bodies.get_mut(&id).map(|wrapper| &mut wrapper.body)
    }

    /// Gets the parent and satellites of a body.
    pub fn get_body_relation(&self, id: Id) -> Option<&BodyRelation> {
        self.bodies.get(&id).map(|wrapper| &wrapper.relations)
    }

    /// Gets the id of a body with a given name.
    ///
    /// If several bodies share the name, the one with the lowest id wins.
    pub fn get_body_id_with_name(&self, name: &str) -> Option<Id> {
        self.bodies
            .iter()
            .filter(|(_, w)| w.body.name == name)
            .map(|(id, _)| *id)
            .min()
    }

    /// Gets the number of bodies in the system.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Is the system empty?
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Advances the simulation by a tick, unless the clock is paused.
    pub fn tick(&mut self) -> bool {
        self.clock.tick()
    }

    /// Advances the simulation by multiple ticks, unless the clock is paused.
    pub fn warp(&mut self, ticks: u64) -> bool {
        self.clock.warp(ticks)
    }

    /// Gets the position of a body relative to its parent at the current time.
    ///
    /// A body without an orbit sits on top of its parent.
    pub fn get_body_local_position(&self, id: Id) -> Option<DVec3> {
        let body = &self.bodies.get(&id)?.body;

        Some(match &body.orbit {
            Some(orbit) => {
                orbit.get_embedded_position_at_time(self.clock.time(), &body.embedding.matrix())
            }
            None => DVec3::ZERO,
        })
    }

    /// Gets the absolute position of a body in the system at the current time.
    ///
    /// `id`: The id of the body to get the position of.
    ///
    /// Returns: The absolute position of the body.
    /// The top ancestor of the body (i.e, the body with no parent) is at the origin.
    pub fn get_body_position(&self, id: Id) -> Option<DVec3> {
        let mut position = self.get_body_local_position(id)?;
        let mut parent = self.bodies.get(&id)?.relations.parent;

        while let Some(parent_id) = parent {
            let wrapper = match self.bodies.get(&parent_id) {
                Some(wrapper) => wrapper,
                None => break,
            };
            if let Some(parent_position) = self.get_body_local_position(parent_id) {
                position += parent_position;
            }
            parent = wrapper.relations.parent;
        }

        Some(position)
    }

    /// Gets how far a body has turned about its own axis at the current
    /// time, in radians, in `[0, tau)`.
    pub fn get_body_rotation(&self, id: Id) -> Option<f64> {
        let body = &self.bodies.get(&id)?.body;
        Some(body.rotation_at_time(self.clock.time()))
    }

    /// Gets the absolute position of every body at the current time,
    /// in ascending id order.
    pub fn positions(&self) -> Vec<(Id, DVec3)> {
        self.get_body_ids()
            .into_iter()
            .filter_map(|id| Some((id, self.get_body_position(id)?)))
            .collect()
    }
}

impl Default for System {
    fn default() -> Self {
        System::new(Clock::default())
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "System with {} bodies, t={}",
            self.bodies.len(),
            self.clock.time()
        )
    }
}
