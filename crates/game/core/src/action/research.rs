//! RESEARCH: buy a technology with science.
//!
//! Each owned technology in the same category discounts the price by one,
//! floored at the configured minimum. Immediate income effects apply on
//! acquisition; recurring effects are read from the tech record at Upkeep.

use crate::env::{GameEnv, TechEffect};
use crate::state::{GameState, PlayerId, ResourceKind, TechId};

use super::effect::Effect;
use super::error::Rejection;
use super::ValidationFailure;

/// Payload: the technology to acquire.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResearchAction {
    pub tech: TechId,
}

/// Discounted price: base minus owned same-category techs, floored.
pub fn effective_cost(base_cost: u32, owned_in_category: u32, floor: u32) -> u32 {
    base_cost.saturating_sub(owned_in_category).max(floor)
}

pub(crate) fn validate(
    state: &GameState,
    env: &GameEnv<'_>,
    player: PlayerId,
    action: &ResearchAction,
) -> Result<Vec<Effect>, ValidationFailure> {
    let catalog = env.catalog()?;
    let tech = catalog
        .technology(&action.tech)
        .ok_or(Rejection::UnknownTech {
            tech: action.tech.clone(),
        })?;
    if !tech.can_research {
        return Err(Rejection::TechNotResearchable {
            tech: tech.id.clone(),
        }
        .into());
    }

    let player_state = state
        .players
        .get(&player)
        .ok_or(Rejection::UnknownPlayer { player })?;
    if player_state.owns_tech(&tech.id) {
        return Err(Rejection::TechAlreadyOwned {
            tech: tech.id.clone(),
        }
        .into());
    }
    for prerequisite in &tech.prerequisites {
        if !player_state.owns_tech(prerequisite) {
            return Err(Rejection::MissingPrerequisite {
                tech: tech.id.clone(),
                prerequisite: prerequisite.clone(),
            }
            .into());
        }
    }

    let owned_in_category = catalog
        .technologies_in_category(tech.category)
        .iter()
        .filter(|candidate| player_state.owns_tech(&candidate.id))
        .count() as u32;
    let cost = effective_cost(
        tech.base_cost,
        owned_in_category,
        state.config.research_min_cost,
    );

    if player_state.resources.science < cost {
        return Err(Rejection::InsufficientResource {
            kind: ResourceKind::Science,
            need: cost,
            have: player_state.resources.science,
        }
        .into());
    }

    let mut effects = Vec::new();
    if cost > 0 {
        effects.push(Effect::Debit {
            player,
            kind: ResourceKind::Science,
            amount: cost,
        });
    }
    effects.push(Effect::GrantTech {
        player,
        tech: tech.id.clone(),
    });
    for effect in &tech.effects {
        if let TechEffect::ImmediateIncome { kind, amount } = effect {
            effects.push(Effect::Credit {
                player,
                kind: *kind,
                amount: *amount,
            });
        }
    }
    Ok(effects)
}
