//! Records every `MatchFinished` event a test app triggers.
use bevy::ecs::prelude::On;
use bevy::prelude::*;
use redlight::{MatchFinished, Outcome};

/// Outcomes announced so far, in order.
#[derive(Resource, Default, Debug)]
pub struct CapturedOutcomes(pub Vec<Outcome>);

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_outcome(event: On<MatchFinished>, mut outcomes: ResMut<CapturedOutcomes>) {
    outcomes.0.push(event.event().outcome);
}

/// Installs the capturing observer and resource on the provided app.
pub fn install_outcome_observer(app: &mut App) {
    app.insert_resource(CapturedOutcomes::default());
    app.add_observer(record_outcome);
}
