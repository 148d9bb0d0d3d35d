//! Rule registry: the ordered rule list and rule lookup.

use tracing::debug;

use slotsort_core::{Entity, RuleId, SortError, SortResult};

use crate::rule::SortingRule;

/// Owns the priority-ordered rule list.
///
/// Priority is list position. The default rule is always present and always
/// last; user rules are inserted, moved, and removed in front of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortController {
    rules: Vec<SortingRule>,
}

impl Default for SortController {
    fn default() -> Self {
        Self::new()
    }
}

fn position_of<E: Entity>(entities: &[E], id: &E::Id) -> Option<usize> {
    entities.iter().position(|entity| entity.id() == id)
}

impl SortController {
    /// A registry holding only the default rule.
    pub fn new() -> Self {
        Self {
            rules: vec![SortingRule::unsorted()],
        }
    }

    /// Rebuild a registry from a persisted rule list.
    ///
    /// List order is priority order. A default rule in the list keeps its
    /// settings but is moved to the end; one is created if missing.
    pub fn from_rules(rules: impl IntoIterator<Item = SortingRule>) -> SortResult<Self> {
        let mut default_rule = SortingRule::unsorted();
        let mut user_rules: Vec<SortingRule> = Vec::new();

        for rule in rules {
            if rule.is_default() {
                default_rule = rule;
                continue;
            }
            rule.validate()?;
            if position_of(&user_rules, &rule.id).is_some() {
                return Err(SortError::validation(format!("duplicate rule id {}", rule.id)));
            }
            user_rules.push(rule);
        }

        user_rules.push(default_rule);
        let mut controller = Self { rules: user_rules };
        controller.reindex();
        Ok(controller)
    }

    /// All rules in priority order (default rule last).
    pub fn rules(&self) -> &[SortingRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn default_rule(&self) -> &SortingRule {
        // The default rule is kept last by every mutation.
        &self.rules[self.rules.len() - 1]
    }

    pub fn get(&self, id: RuleId) -> Option<&SortingRule> {
        position_of(&self.rules, &id).map(|index| &self.rules[index])
    }

    pub fn contains(&self, id: RuleId) -> bool {
        self.get(id).is_some()
    }

    /// Look up a rule; unknown ids resolve to the default rule.
    pub fn rule(&self, id: RuleId) -> &SortingRule {
        self.get(id).unwrap_or_else(|| self.default_rule())
    }

    /// Append a rule with the lowest priority among user rules.
    pub fn add_rule(&mut self, rule: SortingRule) -> SortResult<RuleId> {
        if rule.is_default() {
            return Err(SortError::ReservedRule);
        }
        if self.contains(rule.id) {
            return Err(SortError::validation(format!("duplicate rule id {}", rule.id)));
        }
        rule.validate()?;

        let id = rule.id;
        let default_position = self.rules.len() - 1;
        self.rules.insert(default_position, rule);
        self.reindex();
        debug!(rule_id = %id, "rule added");
        Ok(id)
    }

    /// Replace a rule's configuration in place, keeping its priority.
    pub fn update_rule(&mut self, rule: SortingRule) -> SortResult<()> {
        let position = position_of(&self.rules, &rule.id).ok_or(SortError::UnknownRule(rule.id))?;
        rule.validate()?;
        self.rules[position] = rule;
        self.reindex();
        Ok(())
    }

    /// Remove a user rule. Slots still bound to it fall back to the default rule.
    pub fn remove_rule(&mut self, id: RuleId) -> SortResult<SortingRule> {
        if id.is_default() {
            return Err(SortError::ReservedRule);
        }
        let position = position_of(&self.rules, &id).ok_or(SortError::UnknownRule(id))?;
        let removed = self.rules.remove(position);
        self.reindex();
        debug!(rule_id = %id, "rule removed");
        Ok(removed)
    }

    /// Move a user rule to `position` (clamped to stay ahead of the default rule).
    pub fn move_rule(&mut self, id: RuleId, position: usize) -> SortResult<()> {
        if id.is_default() {
            return Err(SortError::ReservedRule);
        }
        let current = position_of(&self.rules, &id).ok_or(SortError::UnknownRule(id))?;
        let rule = self.rules.remove(current);
        let target = position.min(self.rules.len() - 1);
        self.rules.insert(target, rule);
        self.reindex();
        Ok(())
    }

    fn reindex(&mut self) {
        for (index, rule) in self.rules.iter_mut().enumerate() {
            rule.index = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::ItemCategory;
    use crate::filter::{RangeFilter, RuleFilters};

    fn rule(name: &str) -> SortingRule {
        SortingRule::new(name).with_filters(RuleFilters::categories([ItemCategory(1)]))
    }

    fn names(controller: &SortController) -> Vec<&str> {
        controller.rules().iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn new_registry_holds_only_default_rule() {
        let controller = SortController::new();
        assert_eq!(controller.len(), 1);
        assert!(controller.default_rule().is_default());
    }

    #[test]
    fn added_rules_stay_ahead_of_default_with_contiguous_indices() {
        let mut controller = SortController::new();
        let a = controller.add_rule(rule("A")).unwrap();
        let b = controller.add_rule(rule("B")).unwrap();

        assert_eq!(names(&controller), vec!["A", "B", "Unsorted"]);
        assert_eq!(controller.rule(a).index, 0);
        assert_eq!(controller.rule(b).index, 1);
        assert_eq!(controller.default_rule().index, 2);
    }

    #[test]
    fn unknown_ids_resolve_to_default() {
        let controller = SortController::new();
        assert!(controller.rule(RuleId::new()).is_default());
        assert!(controller.get(RuleId::new()).is_none());
    }

    #[test]
    fn default_rule_is_reserved() {
        let mut controller = SortController::new();
        assert_eq!(controller.add_rule(SortingRule::unsorted()), Err(SortError::ReservedRule));
        assert_eq!(controller.remove_rule(RuleId::DEFAULT), Err(SortError::ReservedRule));
        assert_eq!(controller.move_rule(RuleId::DEFAULT, 0), Err(SortError::ReservedRule));
    }

    #[test]
    fn move_rule_reorders_and_clamps_before_default() {
        let mut controller = SortController::new();
        let a = controller.add_rule(rule("A")).unwrap();
        controller.add_rule(rule("B")).unwrap();
        let c = controller.add_rule(rule("C")).unwrap();

        controller.move_rule(c, 0).unwrap();
        assert_eq!(names(&controller), vec!["C", "A", "B", "Unsorted"]);

        controller.move_rule(a, 99).unwrap();
        assert_eq!(names(&controller), vec!["C", "B", "A", "Unsorted"]);
        assert_eq!(controller.rule(a).index, 2);
    }

    #[test]
    fn remove_and_update_require_known_ids() {
        let mut controller = SortController::new();
        let a = controller.add_rule(rule("A")).unwrap();
        let stranger = RuleId::new();

        assert_eq!(controller.remove_rule(stranger), Err(SortError::UnknownRule(stranger)));
        assert!(controller.update_rule(rule("X").with_id(stranger)).is_err());

        let mut renamed = controller.rule(a).clone();
        renamed.name = "Arms".to_string();
        controller.update_rule(renamed).unwrap();
        assert_eq!(controller.rule(a).name, "Arms");

        let removed = controller.remove_rule(a).unwrap();
        assert_eq!(removed.name, "Arms");
        assert!(controller.rule(a).is_default());
    }

    #[test]
    fn invalid_rules_are_rejected() {
        let mut controller = SortController::new();
        let bad = SortingRule::new("Bad").with_filters(RuleFilters {
            item_level: RangeFilter::between(90, 1),
            ..RuleFilters::default()
        });
        assert!(matches!(controller.add_rule(bad), Err(SortError::Validation(_))));

        let a = rule("A");
        controller.add_rule(a.clone()).unwrap();
        assert!(controller.add_rule(a).is_err());
    }

    #[test]
    fn from_rules_moves_default_last_and_rejects_duplicates() {
        let mut unsorted = SortingRule::unsorted();
        unsorted.name = "Everything Else".to_string();
        let controller = SortController::from_rules([unsorted, rule("A"), rule("B")]).unwrap();
        assert_eq!(names(&controller), vec!["A", "B", "Everything Else"]);
        assert_eq!(controller.default_rule().index, 2);

        let a = rule("A");
        assert!(SortController::from_rules([a.clone(), a]).is_err());
    }
}
