//! Validation: budgets, caps, mastery ceilings, prerequisites and data gaps.

use std::collections::{BTreeMap, BTreeSet};

use super::{CalculationContext, Synthesis, UnresolvedChoice};
use crate::effect::SourceKind;
use crate::rules::{ATTRIBUTE_FLOOR, LevelCaps};
use crate::stats::Attribute;
use crate::validation::{
    AttributeLimit, BuildStep, IssueCode, MasteryLimit, MasteryLimits, ValidationIssue,
    ValidationResult,
};

/// Collects issues while the checks run.
#[derive(Default)]
struct Report {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Report {
    fn error(&mut self, step: BuildStep, field: impl Into<String>, code: IssueCode, message: String) {
        self.errors.push(ValidationIssue::new(step, field, code, message));
    }

    fn warn(&mut self, step: BuildStep, field: impl Into<String>, code: IssueCode, message: String) {
        self.warnings.push(ValidationIssue::new(step, field, code, message));
    }

    /// Overbudget is an error; leftover points are a warning.
    fn budget(&mut self, step: BuildStep, field: &str, label: &str, used: i32, available: i32) {
        if used > available {
            self.error(
                step,
                field,
                IssueCode::PointsOverbudget,
                format!(
                    "{label} over budget by {} ({used} used of {available})",
                    used.saturating_sub(available)
                ),
            );
        } else if used < available {
            self.warn(
                step,
                field,
                IssueCode::PointsUnspent,
                format!("{} {label} unspent", available.saturating_sub(used)),
            );
        }
    }
}

pub fn validate(
    ctx: &CalculationContext<'_>,
    synthesis: &Synthesis,
    unresolved: &[UnresolvedChoice],
) -> ValidationResult {
    let caps = LevelCaps::for_level(ctx.level);
    let mut report = Report::default();

    let attribute_limits = attribute_limits(ctx, synthesis, caps, &mut report);
    budgets(synthesis, &mut report);
    let mastery_limits = mastery_limits(ctx, synthesis, caps, &mut report);
    traits(ctx, &mut report);
    leveling(ctx, &mut report);

    if !synthesis.progression_complete {
        report.error(
            BuildStep::Class,
            "classId",
            IssueCode::MissingProgression,
            format!(
                "class '{}' has no complete progression table through level {}",
                ctx.class.id, ctx.level
            ),
        );
    }

    for choice in unresolved {
        let step = match choice.source.kind {
            SourceKind::Trait => BuildStep::Ancestry,
            SourceKind::Talent | SourceKind::MulticlassFeature | SourceKind::Path => {
                BuildStep::Leveling
            }
            SourceKind::ClassFeature | SourceKind::SubclassFeature | SourceKind::Choice => {
                BuildStep::Class
            }
        };
        let message = match &choice.rejected_value {
            Some(value) => format!("'{value}' is not a valid choice for {}", choice.source.name),
            None => format!("{}: {}", choice.source.name, choice.prompt),
        };
        report.warn(step, choice.key.to_string(), IssueCode::ChoiceUnresolved, message);
    }

    ValidationResult::new(report.errors, report.warnings, attribute_limits, mastery_limits)
}

fn attribute_limits(
    ctx: &CalculationContext<'_>,
    synthesis: &Synthesis,
    caps: LevelCaps,
    report: &mut Report,
) -> BTreeMap<Attribute, AttributeLimit> {
    let base = ctx.input.base_attributes();
    base.iter()
        .map(|(attribute, value)| {
            if value < ATTRIBUTE_FLOOR {
                report.error(
                    BuildStep::Attributes,
                    attribute.as_ref(),
                    IssueCode::AttributeBelowMinimum,
                    format!("{} is {value}, below the minimum of {ATTRIBUTE_FLOOR}", attribute.label()),
                );
            }
            let limit = AttributeLimit::new(value, synthesis.attributes.bonus(attribute), caps.attribute);
            (attribute, limit)
        })
        .collect()
}

fn budgets(synthesis: &Synthesis, report: &mut Report) {
    let level = &synthesis.level_budgets;
    report.budget(
        BuildStep::Attributes,
        "attributePoints",
        "attribute points",
        level.spent_attribute_points,
        level.total_attribute_points,
    );

    let ancestry = &synthesis.ancestry;
    report.budget(
        BuildStep::Ancestry,
        "ancestryPoints",
        "ancestry points",
        ancestry.used_points,
        ancestry.base_points,
    );

    let background = &synthesis.background;
    report.budget(
        BuildStep::Background,
        "skillPoints",
        "skill points",
        background.skill_points_used,
        background.available_skill_points,
    );
    report.budget(
        BuildStep::Background,
        "tradePoints",
        "trade points",
        background.trade_points_used,
        background.available_trade_points,
    );
    report.budget(
        BuildStep::Background,
        "languagePoints",
        "language points",
        background.language_points_used,
        background.available_language_points,
    );

    report.budget(
        BuildStep::Leveling,
        "selectedTalents",
        "talents",
        level.spent_talents,
        level.total_talents,
    );
    report.budget(
        BuildStep::Leveling,
        "pathPointAllocations",
        "path points",
        level.spent_path_points,
        level.total_path_points,
    );
}

fn mastery_limits(
    ctx: &CalculationContext<'_>,
    synthesis: &Synthesis,
    caps: LevelCaps,
    report: &mut Report,
) -> MasteryLimits {
    let input = ctx.input;
    let grants = &synthesis.grants;

    let skills = mastery_table(
        ctx.env.skills.skills().iter().map(|s| s.id.as_str()),
        &input.skills_data,
        caps.mastery,
        |id| grants.skill_expertise(id),
    );
    let trades = mastery_table(
        ctx.env.skills.trades().iter().map(|t| t.id.as_str()),
        &input.trades_data,
        caps.mastery,
        |id| grants.trade_expertise(id),
    );

    for (field, entries) in [("skillsData", &skills), ("tradesData", &trades)] {
        for (id, limit) in entries.iter().filter(|(_, limit)| limit.exceeded) {
            report.error(
                BuildStep::Background,
                format!("{field}.{id}"),
                IssueCode::MasteryLimitExceeded,
                format!("{id} is at rank {}, above its maximum of {}", limit.current, limit.max),
            );
        }
    }

    MasteryLimits {
        max_skill_mastery: caps.mastery,
        max_trade_mastery: caps.mastery,
        skills,
        trades,
    }
}

/// One limit per catalog entry plus any ranked id the catalog lacks.
fn mastery_table<'a>(
    catalog: impl Iterator<Item = &'a str>,
    ranks: &'a BTreeMap<String, u8>,
    level_cap: u8,
    expertise: impl Fn(&str) -> u8,
) -> BTreeMap<String, MasteryLimit> {
    let ids: BTreeSet<&str> = catalog.chain(ranks.keys().map(String::as_str)).collect();
    ids.into_iter()
        .map(|id| {
            let current = ranks.get(id).copied().unwrap_or(0);
            (id.to_string(), MasteryLimit::new(current, level_cap, expertise(id)))
        })
        .collect()
}

fn traits(ctx: &CalculationContext<'_>, report: &mut Report) {
    let input = ctx.input;

    for ancestry_id in input.ancestry_ids() {
        if ctx.env.ancestries.ancestry(ancestry_id).is_none() {
            report.warn(
                BuildStep::Ancestry,
                "ancestryId",
                IssueCode::UnknownAncestry,
                format!("unknown ancestry '{ancestry_id}'"),
            );
        }
    }

    for trait_id in &input.selected_trait_ids {
        let Some(definition) = ctx.env.traits.ancestry_trait(trait_id) else {
            continue;
        };

        if let Err(failure) = definition.prerequisites.check(&input.selected_trait_ids) {
            report.error(
                BuildStep::Ancestry,
                format!("selectedTraitIds.{trait_id}"),
                IssueCode::TraitPrerequisiteUnmet,
                format!("{}: {failure}", definition.name),
            );
        }

        if let Some(owner) = &definition.ancestry {
            if !input.ancestry_ids().any(|id| id == owner.as_str()) {
                report.warn(
                    BuildStep::Ancestry,
                    format!("selectedTraitIds.{trait_id}"),
                    IssueCode::TraitAncestryMismatch,
                    format!("{} belongs to ancestry '{owner}', which is not selected", definition.name),
                );
            }
        }
    }
}

fn leveling(ctx: &CalculationContext<'_>, report: &mut Report) {
    for (talent_id, &times) in &ctx.input.selected_talents {
        let Some(talent) = ctx.env.talents.talent(talent_id) else {
            continue;
        };
        if times > talent.max_times {
            report.error(
                BuildStep::Leveling,
                format!("selectedTalents.{talent_id}"),
                IssueCode::TalentLimitExceeded,
                format!("{} taken {times} times, at most {} allowed", talent.name, talent.max_times),
            );
        }
    }
}
