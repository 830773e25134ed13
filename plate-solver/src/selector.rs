use crate::{PlateLayout, PortionModel, SolverParams, run_annealing};
use plate_core::models::{
    Catalog, Category, ConfigurationError, HealthGoal, ItemId, Map, MealItemSpec, PlateSection,
    TargetRange,
};
use std::{
    convert::Infallible,
    num::NonZeroU32,
    ops::ControlFlow,
    time::{Duration, Instant},
};
use tracing::{Level, event, span};

mod combinations;
pub use combinations::Combinations;

/// The ids of the items in the (large, small1, small2) sections
pub type TripleKey = (ItemId, ItemId, ItemId);

/// Final annealing costs, keyed by item triple
#[derive(Clone, Debug, Default)]
pub struct CostCache(Map<TripleKey, f64>);

impl CostCache {
    /// The cached cost of a triple
    pub fn get(&self, key: &TripleKey) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Record the cost of a triple
    pub fn insert(&mut self, key: TripleKey, cost: f64) {
        self.0.insert(key, cost);
    }

    /// The number of distinct triples evaluated
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been evaluated
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the entries in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = (&TripleKey, f64)> {
        self.0.iter().map(|(key, cost)| (key, *cost))
    }
}

/// The category that gets the large section for a health goal
pub fn large_portion_category(goal: HealthGoal) -> Category {
    match goal {
        HealthGoal::BuildMuscle | HealthGoal::ImproveTone => Category::Protein,
        HealthGoal::AthleticPerformance => Category::Grain,
        HealthGoal::LoseWeight | HealthGoal::ImproveHealth => Category::Vegetable,
    }
}

/// The categories filling the (large, small1, small2) sections.
///
/// The plate is protein, vegetable, grain by default; the goal's large-portion
/// category trades places with protein. Plates without a large section always
/// keep protein there.
pub fn section_categories(goal: HealthGoal, layout: &PlateLayout) -> [Category; 3] {
    let mut sections = [Category::Protein, Category::Vegetable, Category::Grain];
    let large = if layout.has_large_section() {
        large_portion_category(goal)
    } else {
        Category::Protein
    };
    match large {
        Category::Protein => {}
        Category::Vegetable => sections.swap(0, 1),
        Category::Grain => sections.swap(0, 2),
    }
    sections
}

/// Build the portions of a triple, one item per section
pub fn triple_portions(items: [&MealItemSpec; 3], layout: &PlateLayout) -> Vec<PortionModel> {
    PlateSection::ALL
        .iter()
        .zip(items)
        .map(|(&section, item)| {
            PortionModel::from_item(
                item,
                layout.container_volume(section),
                NonZeroU32::MIN,
                section,
            )
        })
        .collect()
}

/// Progress through the triple evaluations of a selector run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Triples evaluated so far (including cache hits)
    pub evaluated: usize,
    /// Triples in the cross product
    pub total: usize,
}

/// The items chosen for one plate section
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionChoice {
    /// The category the section is filled from
    pub category: Category,
    /// The chosen items, in catalog order
    pub items: Vec<ItemId>,
}

/// The result of a selector run
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    /// The choice for every section, in plate order
    pub sections: Map<PlateSection, SectionChoice>,
    /// The summed triple cost of the winning subsets
    pub total_cost: f64,
    /// Wall time spent in the run
    #[cfg_attr(feature = "serde", serde(with = "humantime_serde"))]
    pub elapsed: Duration,
    /// The number of annealing runs performed
    pub annealing_runs: usize,
}

/// Chooses a fixed-size subset of items for each plate section.
///
/// A run first anneals every triple in the cross product of the three
/// sections' catalogs, then searches all combinations of per-section subsets
/// for the one whose triples have the smallest total cost. The search is
/// exhaustive, and ties go to the first combination in lexicographic order.
#[derive(Clone, Debug)]
pub struct MealItemSelector {
    target: TargetRange,
    goal: HealthGoal,
    params: SolverParams,
    cache: CostCache,
}

impl MealItemSelector {
    /// Create a selector for a target range and goal
    pub fn new(
        target: TargetRange,
        goal: HealthGoal,
        params: SolverParams,
    ) -> Result<Self, ConfigurationError> {
        params.validate()?;
        Ok(Self {
            target,
            goal,
            params,
            cache: CostCache::default(),
        })
    }

    /// The categories filling the (large, small1, small2) sections
    pub fn section_categories(&self) -> [Category; 3] {
        section_categories(self.goal, &self.params.layout)
    }

    /// The triple costs gathered by the most recent run
    pub fn cache(&self) -> &CostCache {
        &self.cache
    }

    /// Run to completion
    pub fn run(&mut self, catalog: &Catalog) -> Selection {
        match self.anneal(catalog, |_| ControlFlow::<Infallible>::Continue(())) {
            ControlFlow::Continue(selection) => selection,
            ControlFlow::Break(never) => match never {},
        }
    }

    /// Run, reporting progress after every triple. Returning
    /// [`ControlFlow::Break`] abandons the run and yields `None`.
    pub fn run_with(
        &mut self,
        catalog: &Catalog,
        progress: impl FnMut(Progress) -> ControlFlow<()>,
    ) -> Option<Selection> {
        match self.anneal(catalog, progress) {
            ControlFlow::Continue(selection) => Some(selection),
            ControlFlow::Break(()) => None,
        }
    }

    fn anneal<B>(
        &mut self,
        catalog: &Catalog,
        progress: impl FnMut(Progress) -> ControlFlow<B>,
    ) -> ControlFlow<B, Selection> {
        let params = self.params;
        self.select(catalog, progress, |target, items| {
            run_annealing(target, items, &params).outcome.final_cost
        })
    }

    fn select<B>(
        &mut self,
        catalog: &Catalog,
        mut progress: impl FnMut(Progress) -> ControlFlow<B>,
        mut evaluate: impl FnMut(&TargetRange, [&MealItemSpec; 3]) -> f64,
    ) -> ControlFlow<B, Selection> {
        let categories = self.section_categories();
        let span = span!(Level::INFO, "select", goal = %self.goal);
        let _guard = span.enter();
        let start = Instant::now();

        self.cache = CostCache::default();
        let [large, small1, small2] = categories.map(|category| catalog.items(category));
        let total = large.len() * small1.len() * small2.len();

        // Phase 1: the cost of every triple, flattened in (large, small1, small2) order
        let mut costs = Vec::with_capacity(total);
        let mut runs = 0;
        for l in large {
            for s1 in small1 {
                for s2 in small2 {
                    let key = (l.id.clone(), s1.id.clone(), s2.id.clone());
                    let cost = match self.cache.get(&key) {
                        Some(cost) => cost,
                        None => {
                            let cost = evaluate(&self.target, [l, s1, s2]);
                            event!(
                                Level::DEBUG,
                                large = %l.id,
                                small1 = %s1.id,
                                small2 = %s2.id,
                                cost,
                                "evaluated triple"
                            );
                            self.cache.insert(key, cost);
                            runs += 1;
                            cost
                        }
                    };
                    costs.push(cost);

                    let evaluated = costs.len();
                    if let ControlFlow::Break(reason) = progress(Progress { evaluated, total }) {
                        event!(Level::INFO, evaluated, total, "selection abandoned");
                        return ControlFlow::Break(reason);
                    }
                }
            }
        }
        event!(
            Level::INFO,
            triples = total,
            runs,
            cache_hits = total - runs,
            "triple costs complete"
        );

        // Phase 2: the subsets whose cross product costs the least
        let k = self.params.choose_count;
        let index = |i: usize, j: usize, m: usize| costs[(i * small1.len() + j) * small2.len() + m];
        let mut best: Option<(f64, [Vec<usize>; 3])> = None;
        let mut searched = 0usize;
        for cl in Combinations::new(large.len(), k.min(large.len())) {
            for cs1 in Combinations::new(small1.len(), k.min(small1.len())) {
                for cs2 in Combinations::new(small2.len(), k.min(small2.len())) {
                    let mut cost = 0.0;
                    for &i in &cl {
                        for &j in &cs1 {
                            for &m in &cs2 {
                                cost += index(i, j, m);
                            }
                        }
                    }
                    searched += 1;
                    if best.as_ref().is_none_or(|(lowest, _)| cost < *lowest) {
                        best = Some((cost, [cl.clone(), cs1.clone(), cs2]));
                    }
                }
            }
        }
        let (total_cost, picks) = best.unwrap_or_default();
        event!(Level::INFO, combinations = searched, total_cost, "subset search complete");

        let sections = PlateSection::ALL
            .iter()
            .zip(categories)
            .zip([large, small1, small2])
            .zip(picks)
            .map(|(((&section, category), items), pick)| {
                let items = pick.into_iter().map(|i| items[i].id.clone()).collect();
                (section, SectionChoice { category, items })
            })
            .collect();

        ControlFlow::Continue(Selection {
            sections,
            total_cost,
            elapsed: start.elapsed(),
            annealing_runs: runs,
        })
    }
}
