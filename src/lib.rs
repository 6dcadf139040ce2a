//! Swingable vines for 2D platformers.
//!
//! `vinekit` simulates hanging vines as anchored chains of Verlet particles
//! and couples them with a player body that can catch, swing on, climb, and
//! jump off them. Everything runs synchronously inside the game tick.
//!
//! # Features
//!
//! - **Verlet chains**: implicit velocity, damping, and a soft rope gravity
//! - **Distance relaxation**: fixed Gauss-Seidel passes, approximately inextensible
//! - **Grab state machine**: explicit grabs, jump-to-catch auto-grab with a
//!   re-grab cooldown, climbing by shifting the held particle
//! - **Bounded coupling**: two-way body/vine exchange with a swing-speed cap
//! - **Generational handles**: the body holds an `Option<VineHandle>`, never a pointer
//! - **Observable**: monitor steps and grab events via the `StepObserver` trait
//! - **`no_std` compatible**: works in embedded and WASM environments
//!
//! # Example
//! ```
//! use vinekit::{PlayerBody, SimpleBody, Vec2, VineManager};
//!
//! let mut vines = VineManager::default();
//! let vine = vines.create_vine(800.0, 100.0, 20).unwrap();
//!
//! let mut body = SimpleBody::new(Vec2::new(800.0, 200.0));
//! vines.grab(vine, 5, &mut body).unwrap();
//! for _ in 0..60 {
//!     vines.update(16.0, &mut body);
//! }
//! assert!(body.is_on_vine());
//! ```

#![no_std]

extern crate alloc;

pub mod vec;
pub mod particle;
pub mod constraint;
pub mod integrator;
pub mod solver;
pub mod chain;
pub mod attachment;
pub mod body;
pub mod proximity;
pub mod handle;
pub mod manager;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use vec::Vec2;
pub use particle::Particle;
pub use constraint::DistanceConstraint;
pub use integrator::Integrator;
pub use solver::ConstraintSolver;
pub use chain::VineChain;
pub use attachment::{AttachmentState, ClimbDirection, Coupling, GrabCause, ReleaseCause, SwingInput};
pub use body::{PlayerBody, SimpleBody};
pub use proximity::ProximityDetector;
pub use handle::VineHandle;
pub use manager::VineManager;
pub use observer::{StepObserver, NoOpStepObserver};
pub use config::{CouplingConfig, ProximityConfig, SystemConfig, VineConfig};
pub use error::VineError;
