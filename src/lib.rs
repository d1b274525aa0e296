//! Reference rectangle API.
//!
//! Serves the persisted rectangle to the resizer core over HTTP:
//!
//! | Route | Behavior |
//! |-------|----------|
//! | `GET /api/rectangle` | Current dimensions (`100 x 50` until something is saved) |
//! | `POST /api/rectangle/validate` | Business-rule check after a simulated delay |
//! | `POST /api/rectangle/update` | Persist to a JSON file |
//! | `GET /healthz` | Liveness |

pub mod config;
pub mod routes;
pub mod services;
pub mod state;
