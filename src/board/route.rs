use super::square::Square;
use super::state::GameState;
use super::step::Step;

/// A sequence of steps walking one piece across the board.
pub type Route = Vec<Step>;

impl GameState {
    /// Every way the piece on `origin` can walk to `destination`
    /// within the steps left this ply, never revisiting a square.
    pub fn legal_routes(&self, origin: Square, destination: Square) -> Vec<Route> {
        let mut routes = Vec::new();
        let mut stack = vec![(*self, origin, Route::new())];
        while let Some((state, square, route)) = stack.pop() {
            for next in state.legal_destinations(square) {
                if next == origin || route.iter().any(|s| s.destination() == next) {
                    continue;
                }
                let step = state
                    .piece_step(square, square.toward(&next).expect("adjacent"))
                    .expect("legal step has a piece");
                let mut child = state;
                let mut walk = route.clone();
                child.take_step(square, next);
                walk.push(step);
                if next == destination {
                    routes.push(walk);
                } else if child.position().at(next) == Some(step.piece) {
                    stack.push((child, next, walk));
                }
            }
        }
        routes
    }

    /// Picks the shortest legal route, breaking ties by how closely each
    /// step's destination tracks the matching step of `preferred`.
    pub fn preferred_route(
        &self,
        origin: Square,
        destination: Square,
        preferred: &[Step],
    ) -> Option<Route> {
        self.legal_routes(origin, destination)
            .into_iter()
            .min_by_key(|route| (route.len(), Self::deviation(route, preferred)))
    }

    fn deviation(route: &[Step], preferred: &[Step]) -> usize {
        route
            .iter()
            .zip(preferred.iter())
            .map(|(a, b)| a.destination().distance(&b.destination()))
            .sum()
    }
}
