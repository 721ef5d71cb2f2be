//! Dependency planning from selected features

use crate::features::{self, BASELINE_DEV_PACKAGES};
use crate::selections::FeatureId;
use std::collections::{BTreeSet, HashSet};

/// Packages to install, split by dependency kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyPlan {
    pub runtime: Vec<String>,
    pub dev: Vec<String>,
}

/// Build the install lists for a set of features.
///
/// Baseline dev packages come first, followed by each selected feature's
/// packages in declaration order. Duplicates keep their first position.
pub fn plan_dependencies(features: &BTreeSet<FeatureId>) -> DependencyPlan {
    let mut plan = DependencyPlan::default();
    let mut seen_runtime = HashSet::new();
    let mut seen_dev = HashSet::new();

    push_unique(&mut plan.dev, &mut seen_dev, BASELINE_DEV_PACKAGES);

    for id in features {
        let spec = features::spec(*id);
        push_unique(&mut plan.runtime, &mut seen_runtime, spec.runtime);
        push_unique(&mut plan.dev, &mut seen_dev, spec.dev);
    }

    plan
}

fn push_unique(list: &mut Vec<String>, seen: &mut HashSet<&'static str>, packages: &[&'static str]) {
    for package in packages {
        if seen.insert(*package) {
            list.push(package.to_string());
        }
    }
}
