// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Stage transitions, concept insertion and call choice.
//!
//! An exhaustive stage walks the whole call list once, backward from a
//! random starting point. For each call the nested iterators run through
//! every combination of blanks before the cursor moves on. When the
//! cursor is back at its start the stage is done and the next one begins.

use crate::context::{CallId, ConceptId, ConceptScan, ScanCursor, SearchContext};
use crate::database::flags::cflag1;
use crate::pick::{PickError, PickStage, ResolveGoodness, SearchGoal};
use crate::state::Counters;
use tracing::{debug, trace};

impl SearchContext {
    fn set_stage(&mut self, stage: PickStage) {
        self.state.stage = stage;
        self.count(Counters::StageChanges);
        match stage.display_name() {
            Some(name) => debug!(?stage, "{name}"),
            None => debug!(?stage, "pick finished"),
        }
    }

    /// Begin a search for `goal`.
    ///
    /// Goals that look for a resolve or a formation get the exhaustive
    /// scans first, so that a one-call answer is always found before a
    /// longer one. Everything else goes straight to random search.
    /// With no calls to choose from the search ends at once.
    pub fn start_pick(&mut self, goal: SearchGoal) {
        self.state.goal = goal;
        self.state.iterators.reset();
        self.state.concept_scan = ConceptScan::default();
        self.state.cursor = ScanCursor::default();
        let stage = if self.memo.calls().is_empty() {
            PickStage::NotPicking
        } else if goal.scans_first() {
            PickStage::StartingFirstScan
        } else {
            PickStage::RandomSearch
        };
        self.set_stage(stage);
    }

    pub fn end_pick(&mut self) {
        self.set_stage(PickStage::NotPicking);
    }

    pub fn current_pick_type(&self) -> PickStage {
        self.state.stage
    }

    pub fn in_exhaustive_search(&self) -> bool {
        self.state.stage.is_exhaustive()
    }

    pub fn reset_internal_iterators(&mut self) {
        self.state.iterators.reset();
    }

    fn concept_scans_enabled(&self) -> bool {
        self.options().concept_scans
            && self.state.goal == SearchGoal::Resolve
            && !self.memo.scan_concepts().is_empty()
    }

    /// The cursor is back at its start: the current call list pass is done.
    fn finish_pass(&mut self) {
        if self.state.stage.has_concept() {
            self.state.concept_scan.index += 1;
            if self.state.concept_scan.index < self.state.concept_scan.limit {
                return;
            }
        }
        let mut next = self.state.stage.next();
        self.state.concept_scan = ConceptScan {
            index: 0,
            limit: self.memo.scan_concepts().len(),
        };
        if !self.concept_scans_enabled() {
            while next.has_concept() {
                next = next.next();
            }
        }
        self.set_stage(next);
    }

    /// Decide whether the next candidate starts with a concept, and move
    /// the scan on to the next call when the previous one is exhausted.
    ///
    /// Called once per candidate, before [`do_pick`](Self::do_pick).
    pub fn pick_concept(&mut self, already_have_concept: bool) -> Option<ConceptId> {
        let mut do_concept = false;
        match self.state.stage {
            PickStage::NotPicking => return None,
            PickStage::StartingFirstScan => {
                // The only draw made by the scans, and not hashed.
                let calls = self.memo.calls().len();
                let start = if self.options().diagnostic_mode || calls == 0 {
                    0
                } else {
                    i64::from(self.draw(calls))
                };
                self.state.cursor = ScanCursor {
                    start,
                    current: start - 1,
                };
                self.set_stage(PickStage::PlainNiceOnly);
                self.reset_internal_iterators();
            }
            PickStage::RandomSearch => {
                let goal = self.state.goal;
                if goal == SearchGoal::ConceptCall && !already_have_concept {
                    do_concept = true;
                } else if let Some(odds) = goal.concept_odds() {
                    do_concept = self.draw(8) < odds;
                    // A yes/no made from a wider draw; hash the outcome.
                    self.hash_choice(u32::from(do_concept));
                }
            }
            _ => {
                if already_have_concept {
                    return None;
                }
                if self.state.iterators.all_idle() {
                    if self.state.cursor.current == self.state.cursor.start {
                        self.finish_pass();
                    }
                    // May go to -1; do_pick wraps it.
                    self.state.cursor.current -= 1;
                }
            }
        }

        if do_concept {
            let available = self.memo.concepts().len();
            if available != 0 {
                let j = self.draw(available) as usize;
                let concept = self.memo.concepts()[j];
                self.count(Counters::ConceptsInserted);
                trace!(concept, "random concept");
                return Some(concept);
            }
        } else if self.state.stage.has_concept() && !already_have_concept {
            let concept = self
                .memo
                .scan_concepts()
                .get(self.state.concept_scan.index)
                .copied();
            if concept.is_some() {
                self.count(Counters::ConceptsInserted);
            }
            return concept;
        }
        None
    }

    /// Choose the call for the current candidate.
    ///
    /// A rejected call is not redrawn here: that would disturb the hash.
    /// The caller abandons the candidate and asks again.
    pub fn do_pick(&mut self) -> Result<CallId, PickError> {
        let calls = self.memo.calls().len();
        if calls == 0 {
            return Err(PickError::EmptyCallList);
        }
        let index = if self.in_exhaustive_search() {
            if self.state.cursor.current < 0 {
                self.state.cursor.current = calls as i64 - 1;
            }
            self.state.cursor.current as usize
        } else {
            self.draw(calls) as usize
        };
        self.hash_choice(index as u32);

        let (level, flags1) = match self.memo.call(index) {
            Some(call) => (call.level, call.flags1),
            None => return Err(PickError::EmptyCallList),
        };
        if self.state.goal.is_level_call() && level < self.options().calling_level.pick_threshold()
        {
            self.count(Counters::LevelRejects);
            return Err(PickError::LevelReject);
        }
        let reject = if self.state.stage.is_nice_only() {
            cflag1::DONT_USE_IN_RESOLVE | cflag1::DONT_USE_IN_NICE_RESOLVE
        } else {
            cflag1::DONT_USE_IN_RESOLVE
        };
        if flags1 & reject != 0 {
            self.count(Counters::FlagRejects);
            return Err(PickError::FlagReject);
        }
        self.count(Counters::CallsPicked);
        trace!(index, stage = ?self.state.stage, "picked call");
        Ok(index)
    }

    pub fn get_resolve_goodness_info(&self) -> ResolveGoodness {
        match self.state.stage {
            PickStage::NotPicking | PickStage::RandomSearch => ResolveGoodness::Maybe,
            stage if stage.is_nice_only() => ResolveGoodness::OnlyNice,
            _ => ResolveGoodness::Always,
        }
    }

    /// Whether a candidate may be more than one call long.
    pub fn pick_allow_multiple_items(&self) -> bool {
        !self.in_exhaustive_search()
    }

    /// Calls with a mandatory subcall are too costly to scan.
    pub fn forbid_call_with_mandatory_subcall(&self) -> bool {
        self.in_exhaustive_search()
    }

    /// Subcalls are only replaced at random in the random stage; the scans
    /// leave the default subcall in place.
    pub fn allow_random_subcall_pick(&self) -> bool {
        self.state.stage == PickStage::RandomSearch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{CallCatalog, CatalogCall};
    use crate::database::Level;
    use crate::pick::{PickOptions, ScriptedRandom};

    fn catalog(n: usize) -> CallCatalog {
        CallCatalog::from_calls(
            (0..n).map(|i| CatalogCall::new(&format!("call {i}"), Level::Mainstream, 0)),
        )
    }

    fn context(memo: CallCatalog, options: PickOptions, draws: Vec<u32>) -> SearchContext {
        SearchContext::with_random(memo, options, Box::new(ScriptedRandom::new(draws)))
    }

    #[test]
    fn test_start_pick_chooses_path() {
        let mut ctx = context(catalog(3), PickOptions::default(), vec![]);
        ctx.start_pick(SearchGoal::Normalize);
        assert_eq!(ctx.current_pick_type(), PickStage::StartingFirstScan);
        assert_eq!(ctx.get_resolve_goodness_info(), ResolveGoodness::Always);
        ctx.start_pick(SearchGoal::RandomCall);
        assert_eq!(ctx.current_pick_type(), PickStage::RandomSearch);
        assert!(ctx.allow_random_subcall_pick());
        assert!(ctx.pick_allow_multiple_items());
        ctx.end_pick();
        assert_eq!(ctx.current_pick_type(), PickStage::NotPicking);
        assert_eq!(ctx.pick_concept(false), None);
        assert_eq!(ctx.get_resolve_goodness_info(), ResolveGoodness::Maybe);
    }

    #[test]
    fn test_scan_walks_backward_from_random_start() {
        let mut ctx = context(catalog(4), PickOptions::default(), vec![2]);
        ctx.start_pick(SearchGoal::Resolve);
        let mut order = Vec::new();
        for _ in 0..4 {
            assert_eq!(ctx.pick_concept(false), None);
            order.push(ctx.do_pick().unwrap());
        }
        assert_eq!(order, vec![1, 0, 3, 2]);
        assert_eq!(ctx.current_pick_type(), PickStage::PlainNiceOnly);
        assert!(ctx.forbid_call_with_mandatory_subcall());
        assert_eq!(ctx.get_resolve_goodness_info(), ResolveGoodness::OnlyNice);

        ctx.pick_concept(false);
        assert_eq!(ctx.current_pick_type(), PickStage::PlainAcceptAll);
        assert_eq!(ctx.do_pick(), Ok(1));
        assert_eq!(ctx.get_resolve_goodness_info(), ResolveGoodness::Always);
    }

    #[test]
    fn test_diagnostic_mode_starts_at_zero() {
        let options = PickOptions {
            diagnostic_mode: true,
            ..PickOptions::default()
        };
        let mut ctx = context(catalog(3), options, vec![2]);
        ctx.start_pick(SearchGoal::Resolve);
        ctx.pick_concept(false);
        assert_eq!(ctx.do_pick(), Ok(2));
        assert_eq!(ctx.state.cursor.start, 0);
    }

    #[test]
    fn test_scans_end_in_random_search() {
        let mut ctx = context(catalog(2), PickOptions::default(), vec![]);
        ctx.start_pick(SearchGoal::Resolve);
        for _ in 0..4 {
            ctx.pick_concept(false);
            ctx.do_pick().unwrap();
        }
        assert_eq!(ctx.current_pick_type(), PickStage::PlainAcceptAll);
        ctx.pick_concept(false);
        assert_eq!(ctx.current_pick_type(), PickStage::RandomSearch);
        assert!(!ctx.forbid_call_with_mandatory_subcall());
    }

    #[test]
    fn test_concept_scans() {
        let memo = catalog(2).with_concepts(vec![7, 8, 9], vec![40, 41]);
        let options = PickOptions {
            concept_scans: true,
            diagnostic_mode: true,
            ..PickOptions::default()
        };
        let mut ctx = context(memo, options, vec![]);
        ctx.start_pick(SearchGoal::Resolve);
        for _ in 0..2 {
            ctx.pick_concept(false);
            ctx.do_pick().unwrap();
        }
        let mut seen = Vec::new();
        for _ in 0..4 {
            let concept = ctx.pick_concept(false);
            assert_eq!(ctx.current_pick_type(), PickStage::ConceptNiceOnly);
            seen.push((concept, ctx.do_pick().unwrap()));
        }
        assert_eq!(
            seen,
            vec![(Some(40), 1), (Some(40), 0), (Some(41), 1), (Some(41), 0)]
        );
        assert_eq!(ctx.pick_concept(true), None);
        assert_eq!(ctx.current_pick_type(), PickStage::ConceptNiceOnly);
        ctx.pick_concept(false);
        assert_eq!(ctx.current_pick_type(), PickStage::PlainAcceptAll);
    }

    #[test]
    fn test_concept_scans_only_for_resolve() {
        let memo = catalog(1).with_concepts(vec![], vec![40]);
        let options = PickOptions {
            concept_scans: true,
            ..PickOptions::default()
        };
        let mut ctx = context(memo, options, vec![]);
        ctx.start_pick(SearchGoal::Reconcile);
        ctx.pick_concept(false);
        ctx.do_pick().unwrap();
        assert_eq!(ctx.pick_concept(false), None);
        assert_eq!(ctx.current_pick_type(), PickStage::PlainAcceptAll);
    }

    #[test]
    fn test_random_concepts() {
        let memo = catalog(3).with_concepts(vec![7, 8, 9], vec![]);
        // Resolve: 1 < 2 inserts a concept, drawn as index 2.
        let mut ctx = context(memo.clone(), PickOptions::default(), vec![1, 2, 5]);
        ctx.start_pick(SearchGoal::Resolve);
        ctx.state.stage = PickStage::RandomSearch;
        assert_eq!(ctx.pick_concept(false), Some(9));
        assert_eq!(ctx.hash(), 1);
        // 5 is not below 2.
        assert_eq!(ctx.pick_concept(false), None);

        // A concept call always gets one, without hashing.
        let mut ctx = context(memo.clone(), PickOptions::default(), vec![0]);
        ctx.start_pick(SearchGoal::ConceptCall);
        assert_eq!(ctx.pick_concept(false), Some(7));
        assert_eq!(ctx.hash(), 0);

        let mut ctx = context(memo, PickOptions::default(), vec![0]);
        ctx.start_pick(SearchGoal::CreateWaves);
        ctx.state.stage = PickStage::RandomSearch;
        assert_eq!(ctx.pick_concept(false), None);
    }

    #[test]
    fn test_do_pick_rejections() {
        let memo = CallCatalog::from_calls([
            CatalogCall::new("easy", Level::Mainstream, 0),
            CatalogCall::new("hard", Level::C1, 0),
            CatalogCall::new("barred", Level::C1, cflag1::DONT_USE_IN_RESOLVE),
            CatalogCall::new("not nice", Level::C1, cflag1::DONT_USE_IN_NICE_RESOLVE),
        ]);
        let mut ctx = context(memo, PickOptions::at_level(Level::C1), vec![0, 1, 2, 3]);
        ctx.start_pick(SearchGoal::LevelCall);
        assert_eq!(ctx.do_pick(), Err(PickError::LevelReject));
        assert_eq!(ctx.do_pick(), Ok(1));
        assert_eq!(ctx.do_pick(), Err(PickError::FlagReject));
        assert_eq!(ctx.do_pick(), Ok(3));
        assert_eq!(ctx.statistics.get(Counters::LevelRejects), 1);
        assert_eq!(ctx.statistics.get(Counters::CallsPicked), 2);

        ctx.state.stage = PickStage::PlainNiceOnly;
        ctx.state.cursor.current = 3;
        assert_eq!(ctx.do_pick(), Err(PickError::FlagReject));
    }

    #[test]
    fn test_empty_call_list() {
        let mut ctx = context(CallCatalog::default(), PickOptions::default(), vec![]);
        for goal in [SearchGoal::Resolve, SearchGoal::RandomCall] {
            ctx.start_pick(goal);
            assert_eq!(ctx.current_pick_type(), PickStage::NotPicking);
            for _ in 0..3 {
                assert_eq!(ctx.pick_concept(false), None);
                assert_eq!(ctx.do_pick(), Err(PickError::EmptyCallList));
                assert_eq!(ctx.current_pick_type(), PickStage::NotPicking);
            }
        }
        assert_eq!(ctx.state.cursor, ScanCursor::default());
    }
}
