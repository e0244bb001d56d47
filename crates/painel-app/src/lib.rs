// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod error;
pub mod forms;
pub mod ids;
pub mod model;
pub mod navigation;
pub mod records;
pub mod remote;
pub mod select;
pub mod session;
pub mod state;
pub mod table;

pub use error::*;
pub use forms::*;
pub use ids::*;
pub use model::*;
pub use navigation::*;
pub use records::*;
pub use remote::*;
pub use select::*;
pub use session::*;
pub use state::*;
pub use table::*;
