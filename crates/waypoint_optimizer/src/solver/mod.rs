pub mod clustering;
pub mod construction;
pub mod deadline;
pub mod distances;
pub mod estimation;
pub mod optimizer;
pub mod optimizer_params;
pub mod route;
pub mod sequencing;
pub mod two_opt;
