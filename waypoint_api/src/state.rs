use waypoint_optimizer::solver::optimizer::Optimizer;

pub struct AppState {
    pub optimizer: Optimizer,
}
