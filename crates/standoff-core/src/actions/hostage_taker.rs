//! Hostage Taker Actions
//!
//! The opponent's repertoire. Validity rules (armed members for force,
//! minimal trust for bargaining) are expressed as requirements so the same
//! validation path covers both sides.

use standoff_events::{ActionCategory, Faction, Side};

use super::{ActionDefinition, Consequence, MetricTarget, Requirement};
use crate::components::{Condition, Demand, HostageStatus, Resource, Role, Severity, TacticalPosition};

/// Thresholds baked into adversary requirements.
pub mod adversary_thresholds {
    /// Bargaining is pointless below this trust
    pub const MIN_NEGOTIATION_TRUST: f32 = 0.1;
    /// Executions only happen once tension is this high
    pub const EXECUTION_TENSION: f32 = 0.6;
}

/// Builds an adversary action with the requirements its category implies.
fn action(name: &str, category: ActionCategory, cost: u32, chance: f32) -> ActionDefinition {
    let base = ActionDefinition::new(name, Side::HostageTaker, category, cost, chance);
    match category {
        ActionCategory::Force => base
            .requires(Requirement::Resource {
                resource: Resource::Manpower,
                min: 1,
            })
            .requires(Requirement::Personnel {
                role: Role::ArmedMember,
                min: 1,
            }),
        ActionCategory::Negotiation => base.requires(Requirement::MinTrust {
            value: adversary_thresholds::MIN_NEGOTIATION_TRUST,
        }),
        ActionCategory::Tactical => base.requires(Requirement::Resource {
            resource: Resource::Manpower,
            min: 1,
        }),
        _ => base,
    }
}

fn needs(resource: Resource, min: u32) -> Requirement {
    Requirement::Resource { resource, min }
}

/// Actions open to every hostage-taker faction.
pub fn common_actions() -> Vec<ActionDefinition> {
    use ActionCategory::*;

    vec![
        // Negotiation
        action("Demand Ransom Increase", Negotiation, 1, 0.7)
            .with_description("Raise the price")
            .consequence(Consequence::escalate(Demand::Money, 250_000))
            .dialogue("The price just went up. Every hour you waste costs more."),
        action("Stall For Time", Negotiation, 1, 0.8)
            .with_description("String the negotiators along")
            .consequence(Consequence::deadline(1))
            .consequence(Consequence::metric(MetricTarget::Tension, -0.05)),
        action("Demand Political Concessions", Negotiation, 2, 0.6)
            .with_description("Make political demands beyond money")
            .consequence(Consequence::escalate(Demand::PrisonerRelease, 1)),
        // Force
        action("Threaten Hostage", Force, 1, 0.75)
            .with_description("Physically threaten a hostage for leverage")
            .requires(Requirement::HostageWithStatus {
                status: HostageStatus::Captured,
            })
            .consequence(Consequence::metric(MetricTarget::OpposingMorale, -0.05))
            .consequence(Consequence::wound(1).with_probability(0.25)),
        action("Barricade Entry Points", Force, 2, 0.8)
            .with_description("Reinforce the defensive positions")
            .consequence(Consequence::secure(TacticalPosition::Barricades))
            .consequence(Consequence::lose(TacticalPosition::BreachPoints)),
        action("Execute Hostage", Force, 3, 0.5)
            .with_description("Kill a hostage to prove they are serious")
            .requires(Requirement::HostageWithStatus {
                status: HostageStatus::Captured,
            })
            .requires(Requirement::MinTension {
                value: adversary_thresholds::EXECUTION_TENSION,
            })
            .irrevocable()
            .consequence(Consequence::kill(1))
            .consequence(Consequence::public_opinion(-0.1))
            .dialogue("You didn't take us seriously. Now you will."),
        // Demands
        action("Set Deadline", Demands, 1, 0.9)
            .with_description("Set a strict deadline for the demands")
            .consequence(Consequence::deadline(-2)),
        action("Escalate Demands", Demands, 2, 0.7)
            .with_description("Add new demands to the list")
            .consequence(Consequence::escalate(Demand::Money, 500_000))
            .consequence(Consequence::escalate(Demand::Transport, 1)),
        // Deception
        action("Plant False Information", Deception, 1, 0.65)
            .with_description("Spread misinformation about their intentions")
            .consequence(Consequence::resource(Resource::Concealment, 1)),
        action("Feign Weakness", Deception, 2, 0.7)
            .with_description("Appear vulnerable to draw out a response")
            .consequence(Consequence::metric(MetricTarget::Tension, -0.1))
            .consequence(Consequence::metric(MetricTarget::OwnMorale, 0.05)),
        // Psychological
        action("Intimidate Negotiators", Psychological, 1, 0.6)
            .with_description("Put psychological pressure on the negotiators")
            .consequence(Consequence::metric(MetricTarget::Tension, 0.05)),
        action("Media Manipulation", Psychological, 2, 0.75)
            .with_description("Use the coverage to their advantage")
            .consequence(Consequence::public_opinion(-0.1)),
        // Tactical
        action("Reposition Forces", Tactical, 1, 0.8)
            .with_description("Move into better positions")
            .consequence(Consequence::resource(Resource::Concealment, 1)),
        action("Secure Escape Route", Tactical, 2, 0.7)
            .with_description("Prepare an alternate way out")
            .consequence(Consequence::secure(TacticalPosition::EscapeRoute)),
    ]
}

fn shadow_syndicate_specials() -> Vec<ActionDefinition> {
    use ActionCategory::*;

    vec![
        action("System Breach", Tech, 1, 0.9)
            .with_description("Hack into the local security systems")
            .special(Faction::ShadowSyndicate, 1)
            .requires(needs(Resource::Equipment, 1))
            .consequence(Consequence::lose(TacticalPosition::Surveillance))
            .consequence(Consequence::resource(Resource::Intelligence, 1)),
        action("Digital Blackout", Tech, 2, 0.85)
            .with_description("Disable communications in the area")
            .special(Faction::ShadowSyndicate, 2)
            .requires(needs(Resource::Equipment, 2))
            .consequence(Consequence::environment(Condition::Power, Severity::Major))
            .consequence(Consequence::lose(TacticalPosition::CommandPost).with_probability(0.5)),
        action("Ghost Protocol", Tech, 3, 0.8)
            .with_description("Activate sleeper agents in key positions")
            .special(Faction::ShadowSyndicate, 3)
            .requires(needs(Resource::Intelligence, 3))
            .consequence(Consequence::resource(Resource::Intelligence, 2))
            .consequence(Consequence::resource(Resource::Concealment, 2))
            .consequence(Consequence::metric(MetricTarget::OpposingMorale, -0.1)),
    ]
}

fn red_dragon_triad_specials() -> Vec<ActionDefinition> {
    use ActionCategory::*;

    vec![
        action("Intimidation Tactics", Force, 1, 0.9)
            .with_description("Use their reputation to raise the pressure")
            .special(Faction::RedDragonTriad, 1)
            .consequence(Consequence::metric(MetricTarget::OpposingMorale, -0.1)),
        action("Underground Network", Resources, 2, 0.85)
            .with_description("Call on criminal contacts for support")
            .special(Faction::RedDragonTriad, 2)
            .requires(needs(Resource::Intelligence, 2))
            .consequence(Consequence::resource(Resource::Manpower, 1))
            .consequence(Consequence::resource(Resource::Equipment, 1))
            .consequence(Consequence::resource(Resource::Intelligence, 1)),
        action("Triad Enforcers", Force, 3, 0.8)
            .with_description("Call in elite enforcers")
            .special(Faction::RedDragonTriad, 3)
            .requires(needs(Resource::Manpower, 4))
            .consequence(Consequence::personnel(Role::ArmedMember, 2)),
    ]
}

fn liberation_front_specials() -> Vec<ActionDefinition> {
    use ActionCategory::*;

    vec![
        action("Ideological Speech", Dialogue, 1, 0.9)
            .with_description("Appeal to political ideals to rally support")
            .special(Faction::LiberationFront, 1)
            .consequence(Consequence::metric(MetricTarget::OwnMorale, 0.1))
            .consequence(Consequence::metric(MetricTarget::Trust, -0.05))
            .dialogue("Our cause is just! The people will support us!"),
        action("Media Statement", Tech, 2, 0.85)
            .with_description("Release propaganda to sway public opinion")
            .special(Faction::LiberationFront, 2)
            .requires(needs(Resource::Equipment, 1))
            .consequence(Consequence::public_opinion(-0.15))
            .consequence(Consequence::metric(MetricTarget::Tension, 0.05)),
        action("Mass Uprising", Force, 3, 0.8)
            .with_description("Trigger widespread civil unrest")
            .special(Faction::LiberationFront, 3)
            .requires(needs(Resource::Intelligence, 3))
            .requires(needs(Resource::Manpower, 5))
            .consequence(Consequence::environment(Condition::Fire, Severity::Minor))
            .consequence(Consequence::metric(MetricTarget::Tension, 0.1))
            .consequence(Consequence::public_opinion(-0.1)),
    ]
}

/// Every hostage-taker action, specials included.
pub fn actions() -> Vec<ActionDefinition> {
    let mut all = common_actions();
    all.extend(shadow_syndicate_specials());
    all.extend(red_dragon_triad_specials());
    all.extend(liberation_front_specials());
    all
}
