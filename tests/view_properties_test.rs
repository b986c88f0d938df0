use brand_presence::{
    brand_filter, filter_sort, group_totals, top_n, CategoryFilter, Dataset, GroupKey, Lookup,
    Metric, Record, Total,
};
use proptest::prelude::*;

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        "[a-zA-Z-]{1,8}\\.(com|net|co\\.uk)",
        prop::sample::select(vec!["Earned", "Social", "Owned"]),
        prop::sample::select(vec!["general", "techie"]),
        0u64..200,
        0u64..100,
        0u64..100,
        (0u32..40).prop_map(|r| f64::from(r) / 2.0),
    )
        .prop_map(|(domain, category, audience, cited, urls, queries, rank)| Record {
            domain,
            category: category.to_string(),
            audience_cluster: audience.to_string(),
            times_cited: cited,
            urls,
            queries,
            rank,
        })
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(record_strategy(), 0..40).prop_map(|records| Dataset::new("prop.csv", records))
}

fn metric_strategy() -> impl Strategy<Value = Metric> {
    prop::sample::select(Metric::ALL.to_vec())
}

proptest! {
    #[test]
    fn test_top_n_size_order_and_dominance(
        dataset in dataset_strategy(),
        n in 0usize..50,
        metric in metric_strategy(),
    ) {
        let top = top_n(&dataset, n, metric);
        prop_assert_eq!(top.len(), n.min(dataset.len()));

        for pair in top.windows(2) {
            prop_assert!(pair[0].metric(metric) >= pair[1].metric(metric));
        }

        // 每個入選值都不小於任何落選值
        if let Some(smallest) = top.last().map(|r| r.metric(metric)) {
            let mut values: Vec<f64> = dataset.records().iter().map(|r| r.metric(metric)).collect();
            values.sort_by(|a, b| b.total_cmp(a));
            for excluded in values.iter().skip(top.len()) {
                prop_assert!(smallest >= *excluded);
            }
        }
    }

    #[test]
    fn test_group_totals_partition_law(
        dataset in dataset_strategy(),
        key in prop::sample::select(vec![GroupKey::Category, GroupKey::AudienceCluster]),
    ) {
        let view = group_totals(&dataset, key, &Metric::COUNTS);
        for metric in Metric::COUNTS {
            let per_group: u64 = view
                .groups
                .iter()
                .filter_map(|g| g.total(metric).available().and_then(Total::count))
                .sum();
            prop_assert_eq!(Total::Count(per_group), dataset.total(metric));
        }
        let rows: usize = view.groups.iter().map(|g| g.rows).sum();
        prop_assert_eq!(rows, dataset.len());
    }

    #[test]
    fn test_group_totals_never_synthesize_absent_groups(dataset in dataset_strategy()) {
        let view = group_totals(&dataset, GroupKey::Category, &[Metric::Cited]);
        for group in ["Earned", "Social", "Owned", "Paid"] {
            let present = dataset.records().iter().any(|r| r.category == group);
            prop_assert_eq!(view.lookup(group, Metric::Cited).is_available(), present);
        }
    }

    #[test]
    fn test_brand_filter_is_case_insensitive(dataset in dataset_strategy(), pattern in "[a-z]{1,3}") {
        let lower = brand_filter(&dataset, &pattern);
        let upper = brand_filter(&dataset, &pattern.to_uppercase());
        prop_assert_eq!(&lower, &upper);
        for record in &lower {
            prop_assert!(record.domain.to_lowercase().contains(&pattern));
        }
    }

    #[test]
    fn test_filter_sort_idempotent_under_noop_filter(
        dataset in dataset_strategy(),
        metric in metric_strategy(),
    ) {
        let every = CategoryFilter::only(
            dataset.distinct_values(GroupKey::Category).into_iter().map(str::to_string),
        );
        let once = filter_sort(&dataset, &every, metric);
        let twice = filter_sort(&Dataset::new("prop.csv", once.clone()), &every, metric);

        prop_assert_eq!(once.len(), dataset.len());
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(&once, &filter_sort(&dataset, &CategoryFilter::All, metric));
    }
}

proptest! {
    #[test]
    fn test_partition_law_holds_beyond_f64_precision(
        cited in prop::collection::vec((1u64 << 52)..(1u64 << 54), 1..8),
        categories in prop::collection::vec(prop::sample::select(vec!["Earned", "Social"]), 8),
    ) {
        let records: Vec<Record> = cited
            .iter()
            .zip(&categories)
            .enumerate()
            .map(|(i, (cited, category))| Record {
                domain: format!("d{}.com", i),
                category: category.to_string(),
                audience_cluster: "general".to_string(),
                times_cited: *cited,
                urls: 0,
                queries: 0,
                rank: 0.0,
            })
            .collect();
        let dataset = Dataset::new("big.csv", records);
        let view = group_totals(&dataset, GroupKey::Category, &[Metric::Cited]);

        let per_group: u64 = view
            .groups
            .iter()
            .filter_map(|g| g.total(Metric::Cited).available().and_then(Total::count))
            .sum();
        prop_assert_eq!(per_group, cited.iter().sum::<u64>());
        prop_assert_eq!(dataset.total(Metric::Cited), Total::Count(per_group));
    }
}

fn scenario() -> Dataset {
    let row = |domain: &str, category: &str, cited: u64| Record {
        domain: domain.to_string(),
        category: category.to_string(),
        audience_cluster: "general".to_string(),
        times_cited: cited,
        urls: 0,
        queries: 0,
        rank: 0.0,
    };
    Dataset::new(
        "scenario.csv",
        vec![
            row("meta.com", "Earned", 50),
            row("ray-ban.com", "Earned", 44),
            row("bestbuy.com", "Social", 30),
        ],
    )
}

#[test]
fn test_scenario_views() {
    let dataset = scenario();

    let top: Vec<(String, u64)> = top_n(&dataset, 2, Metric::Cited)
        .into_iter()
        .map(|r| (r.domain, r.times_cited))
        .collect();
    assert_eq!(
        top,
        vec![("meta.com".to_string(), 50), ("ray-ban.com".to_string(), 44)]
    );

    let view = group_totals(&dataset, GroupKey::Category, &[Metric::Cited]);
    assert_eq!(view.lookup("Earned", Metric::Cited), Lookup::Available(Total::Count(94)));
    assert_eq!(view.lookup("Social", Metric::Cited), Lookup::Available(Total::Count(30)));

    let brands = brand_filter(&dataset, "ray-ban");
    assert_eq!(brands.len(), 1);
    assert_eq!(brands[0].domain, "ray-ban.com");
    assert_eq!(brands[0].times_cited, 44);
}

#[test]
fn test_scenario_absent_category_is_unavailable() {
    let view = group_totals(&scenario(), GroupKey::Category, &[Metric::Cited]);
    assert_eq!(view.lookup("Owned", Metric::Cited), Lookup::Unavailable);
    assert_eq!(view.lookup("Owned", Metric::Cited).to_string(), "N/A");
}

#[test]
fn test_meta_filter_matches_both_cases() {
    let dataset = scenario();
    assert_eq!(brand_filter(&dataset, "META"), brand_filter(&dataset, "meta"));
}
