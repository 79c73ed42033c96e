//! Law Enforcement Actions
//!
//! Everything the player can order: the shared repertoire of every agency and
//! each agency's three special abilities.

use standoff_events::{ActionCategory, Faction, Side};

use super::{ActionDefinition, Consequence, MetricTarget, Requirement, Trigger};
use crate::components::{Condition, Demand, Resource, Role, Severity, TacticalPosition};

fn action(name: &str, category: ActionCategory, cost: u32, chance: f32) -> ActionDefinition {
    ActionDefinition::new(name, Side::LawEnforcement, category, cost, chance)
}

fn needs(resource: Resource, min: u32) -> Requirement {
    Requirement::Resource { resource, min }
}

fn needs_staff(role: Role, min: u32) -> Requirement {
    Requirement::Personnel { role, min }
}

fn secured(position: TacticalPosition) -> Requirement {
    Requirement::PositionSecured { position }
}

/// Actions every law-enforcement agency can take.
pub fn common_actions() -> Vec<ActionDefinition> {
    use ActionCategory::*;

    vec![
        // Dialogue
        action("Open Communication", Dialogue, 1, 0.9)
            .with_description("Establish a line of communication with the hostage takers")
            .consequence(Consequence::secure(TacticalPosition::NegotiationPoint))
            .dialogue("This is the negotiator. Nobody has to get hurt today. Talk to me."),
        action("Empathize", Dialogue, 1, 0.8)
            .with_description("Acknowledge their grievances to lower the temperature")
            .consequence(Consequence::metric(MetricTarget::Tension, -0.05))
            .dialogue("I hear you. Let's work through this together."),
        action("Gather Information", Dialogue, 2, 0.7)
            .with_description("Draw out details about the people inside")
            .consequence(Consequence::resource(Resource::Intelligence, 1)),
        // Negotiation
        action("Negotiate Release", Negotiation, 2, 0.6)
            .with_description("Bargain for the release of a hostage")
            .requires(secured(TacticalPosition::NegotiationPoint))
            .consequence(Consequence::release(1)),
        action("Offer Concession", Negotiation, 2, 0.75)
            .with_description("Put money on the table in exchange for goodwill")
            .requires(needs(Resource::Money, 2))
            .consequence(Consequence::resource(Resource::Money, -2))
            .consequence(Consequence::concede(Demand::Money, 200_000))
            .consequence(Consequence::deadline(2))
            .consequence(Consequence::release(1).with_probability(0.5)),
        action("Arrange Transport", Negotiation, 3, 0.7)
            .with_description("Provide a vehicle in exchange for hostages")
            .requires(needs(Resource::Equipment, 1))
            .consequence(Consequence::resource(Resource::Equipment, -1))
            .consequence(Consequence::concede(Demand::Transport, 1))
            .consequence(Consequence::release(1).with_probability(0.6)),
        // Tactical
        action("Deploy Units", Tactical, 2, 0.9)
            .with_description("Tighten the perimeter around the site")
            .requires(needs(Resource::Manpower, 2))
            .consequence(Consequence::secure(TacticalPosition::Perimeter))
            .consequence(Consequence::metric(MetricTarget::OwnMorale, 0.05)),
        action("Position Snipers", Tactical, 3, 0.7)
            .with_description("Put marksmen on overwatch")
            .requires(needs_staff(Role::Sniper, 1))
            .consequence(Consequence::secure(TacticalPosition::SniperPositions)),
        action("Deploy Breach Team", Tactical, 3, 0.8)
            .with_description("Stage a tactical team at the entry points")
            .requires(needs_staff(Role::TacticalOfficer, 4))
            .consequence(Consequence::secure(TacticalPosition::BreachPoints)),
        action("Surveillance Deployment", Tactical, 2, 0.8)
            .with_description("Install cameras and listening devices")
            .requires(needs(Resource::Equipment, 1))
            .consequence(Consequence::secure(TacticalPosition::Surveillance))
            .consequence(Consequence::resource(Resource::Intelligence, 1)),
        // Resources
        action("Request Equipment", Resources, 2, 0.8)
            .with_description("Requisition gear from headquarters")
            .consequence(Consequence::resource(Resource::Equipment, 2)),
        action("Medical Standby", Resources, 1, 1.0)
            .with_description("Bring ambulances and medics on scene")
            .consequence(Consequence::resource(Resource::Medical, 1))
            .consequence(Consequence::personnel(Role::Medic, 1)),
        action("Call Reinforcements", Resources, 2, 0.75)
            .with_description("Request additional officers")
            .consequence(Consequence::resource(Resource::Manpower, 2))
            .consequence(Consequence::personnel(Role::TacticalOfficer, 2)),
        // Tech
        action("Cut Power", Tech, 2, 0.75)
            .with_description("Shut off power to the building")
            .consequence(Consequence::environment(Condition::Power, Severity::Major))
            .consequence(Consequence::adversary_resource(Resource::Concealment, -1))
            .consequence(Consequence::metric(MetricTarget::Tension, 0.05)),
        action("Restore Power", Tech, 1, 0.85)
            .with_description("Turn the power back on as a goodwill gesture")
            .consequence(Consequence::environment(Condition::Power, Severity::Clear))
            .consequence(Consequence::metric(MetricTarget::Trust, 0.05)),
        action("Signal Intercept", Tech, 2, 0.7)
            .with_description("Tap the phones inside")
            .consequence(Consequence::resource(Resource::Intelligence, 2)),
        // Force
        action("Show of Force", Force, 2, 0.6)
            .with_description("Make the tactical presence impossible to ignore")
            .requires(needs(Resource::Manpower, 2))
            .consequence(Consequence::metric(MetricTarget::OpposingMorale, -0.05))
            .consequence(
                Consequence::wound(1)
                    .with_probability(0.5)
                    .with_trigger(Trigger::OnCriticalFailure),
            ),
        action("Breach and Clear", Force, 3, 0.5)
            .with_description("Storm the building")
            .requires(secured(TacticalPosition::BreachPoints))
            .consequence(Consequence::adversary_personnel(Role::ArmedMember, -2))
            .consequence(Consequence::adversary_personnel(Role::Lookout, -1))
            .consequence(Consequence::release(2).with_probability(0.7))
            .consequence(Consequence::kill(1).with_trigger(Trigger::OnCriticalFailure)),
        action("Sniper Shot", Force, 2, 0.55)
            .with_description("Take out an armed hostage taker")
            .requires(secured(TacticalPosition::SniperPositions))
            .requires(needs_staff(Role::Sniper, 1))
            .consequence(Consequence::adversary_personnel(Role::ArmedMember, -1))
            .consequence(
                Consequence::kill(1)
                    .with_probability(0.5)
                    .with_trigger(Trigger::OnCriticalFailure),
            ),
        // Psychological
        action("Brief the Press", Psychological, 1, 0.8)
            .with_description("Shape the public story")
            .consequence(Consequence::public_opinion(0.1)),
    ]
}

fn fbi_specials() -> Vec<ActionDefinition> {
    use ActionCategory::*;

    vec![
        action("Rapid Response Team", Force, 1, 0.9)
            .with_description("Deploy an elite tactical unit for immediate action")
            .special(Faction::Fbi, 1)
            .requires(needs(Resource::Manpower, 3))
            .consequence(Consequence::secure(TacticalPosition::BreachPoints))
            .consequence(Consequence::metric(MetricTarget::OpposingMorale, -0.05)),
        action("Psychological Operations", Tech, 2, 0.85)
            .with_description("Behavioral analysts predict and steer the hostage takers")
            .special(Faction::Fbi, 2)
            .requires(needs(Resource::Intelligence, 2))
            .consequence(Consequence::resource(Resource::Intelligence, 1))
            .consequence(Consequence::metric(MetricTarget::OpposingMorale, -0.1))
            .consequence(Consequence::metric(MetricTarget::Trust, 0.05)),
        action("Critical Incident Response", Force, 3, 0.8)
            .with_description("Activate the full crisis response protocol")
            .special(Faction::Fbi, 3)
            .requires(needs(Resource::Manpower, 5))
            .requires(needs(Resource::Equipment, 3))
            .consequence(Consequence::resource(Resource::Manpower, 3))
            .consequence(Consequence::resource(Resource::Equipment, 2))
            .consequence(Consequence::secure(TacticalPosition::SniperPositions)),
    ]
}

fn cia_specials() -> Vec<ActionDefinition> {
    use ActionCategory::*;

    vec![
        action("Covert Intelligence", Tech, 1, 0.9)
            .with_description("Pull classified intel on the crew")
            .special(Faction::Cia, 1)
            .consequence(Consequence::resource(Resource::Intelligence, 2))
            .consequence(Consequence::secure(TacticalPosition::Surveillance)),
        action("Media Blackout", Tech, 2, 0.85)
            .with_description("Control coverage and the flow of information")
            .special(Faction::Cia, 2)
            .requires(needs(Resource::Equipment, 2))
            .consequence(Consequence::public_opinion(0.1))
            .consequence(Consequence::adversary_resource(Resource::Concealment, -1)),
        action("Shadow Protocol", Tech, 3, 0.8)
            .with_description("Activate deep cover assets (extra action point next turn)")
            .special(Faction::Cia, 3)
            .consequence(Consequence::bonus_action_points(1))
            .consequence(Consequence::resource(Resource::Intelligence, 1)),
    ]
}

fn local_pd_specials() -> Vec<ActionDefinition> {
    use ActionCategory::*;

    vec![
        action("Local Knowledge", Resources, 1, 0.9)
            .with_description("Use intimate knowledge of the area")
            .special(Faction::LocalPd, 1)
            .consequence(Consequence::resource(Resource::Intelligence, 1))
            .consequence(Consequence::secure(TacticalPosition::Surveillance)),
        action("Community Outreach", Resources, 2, 0.85)
            .with_description("Lean on local connections for support")
            .special(Faction::LocalPd, 2)
            .requires(needs(Resource::Manpower, 2))
            .consequence(Consequence::resource(Resource::Manpower, 2))
            .consequence(Consequence::metric(MetricTarget::Trust, 0.05))
            .consequence(Consequence::public_opinion(0.1)),
        action("City-Wide Lockdown", Force, 3, 0.8)
            .with_description("Seal the city and cut off every way out")
            .special(Faction::LocalPd, 3)
            .requires(needs(Resource::Manpower, 6))
            .consequence(Consequence::lose(TacticalPosition::EscapeRoute))
            .consequence(Consequence::adversary_resource(Resource::Manpower, -1)),
    ]
}

/// Every law-enforcement action, specials included.
pub fn actions() -> Vec<ActionDefinition> {
    let mut all = common_actions();
    all.extend(fbi_specials());
    all.extend(cia_specials());
    all.extend(local_pd_specials());
    all
}
