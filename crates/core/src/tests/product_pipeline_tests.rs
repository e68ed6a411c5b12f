// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_product, ids};
use crate::{ProductCriteria, Selection, SortOrder, categories, filter_products, select_products};
use m5_max_domain::Product;

fn create_test_catalog() -> Vec<Product> {
    vec![
        create_test_product("a", "Tortas", Some("Leque W dourado"), 10.0, Some(5)),
        create_test_product("b", "Tortas", Some("Leque Z prata"), 20.0, Some(20)),
        create_test_product("c", "Bombas", Some("Reto"), 5.0, None),
        create_test_product("d", "Fumaça", Some("Fumaça colorida"), 8.0, Some(0)),
        create_test_product("e", "Tortas", None, 30.0, Some(10)),
    ]
}

#[test]
fn test_no_criteria_keeps_catalog_order() {
    let catalog: Vec<Product> = create_test_catalog();

    let selected: Vec<&Product> = select_products(&catalog, &ProductCriteria::default());

    assert_eq!(ids(&selected), vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_search_matches_name_or_code() {
    let catalog: Vec<Product> = create_test_catalog();
    let by_name: ProductCriteria = ProductCriteria {
        search: String::from("TORTA B"),
        ..ProductCriteria::default()
    };
    let by_code: ProductCriteria = ProductCriteria {
        search: String::from("cod-c"),
        ..ProductCriteria::default()
    };

    assert_eq!(ids(&filter_products(&catalog, &by_name)), vec!["b"]);
    assert_eq!(ids(&filter_products(&catalog, &by_code)), vec!["c"]);
}

#[test]
fn test_category_filter() {
    let catalog: Vec<Product> = create_test_catalog();
    let criteria: ProductCriteria = ProductCriteria {
        category: Selection::Only(String::from("Bombas")),
        ..ProductCriteria::default()
    };

    assert_eq!(ids(&filter_products(&catalog, &criteria)), vec!["c"]);
}

#[test]
fn test_effect_family_filter() {
    let catalog: Vec<Product> = create_test_catalog();
    let leque: ProductCriteria = ProductCriteria {
        effect: Selection::Only(String::from("leque")),
        ..ProductCriteria::default()
    };
    let leque_w: ProductCriteria = ProductCriteria {
        effect: Selection::Only(String::from("leque w")),
        ..ProductCriteria::default()
    };
    let raw: ProductCriteria = ProductCriteria {
        effect: Selection::Only(String::from("colorida")),
        ..ProductCriteria::default()
    };

    assert_eq!(ids(&filter_products(&catalog, &leque)), vec!["a", "b"]);
    assert_eq!(ids(&filter_products(&catalog, &leque_w)), vec!["a"]);
    assert_eq!(ids(&filter_products(&catalog, &raw)), vec!["d"]);
}

#[test]
fn test_ordering_excludes_products_without_positive_duration() {
    let catalog: Vec<Product> = create_test_catalog();

    for (price, duration) in [
        (SortOrder::Asc, SortOrder::None),
        (SortOrder::None, SortOrder::Desc),
        (SortOrder::Desc, SortOrder::Desc),
    ] {
        let criteria: ProductCriteria = ProductCriteria {
            price_order: price,
            duration_order: duration,
            ..ProductCriteria::default()
        };
        let selected: Vec<String> = ids(&select_products(&catalog, &criteria));
        assert!(!selected.contains(&String::from("c")));
        assert!(!selected.contains(&String::from("d")));
        assert_eq!(selected.len(), 3);
    }
}

#[test]
fn test_exclusion_applies_even_when_other_filters_match() {
    let catalog: Vec<Product> = create_test_catalog();
    let criteria: ProductCriteria = ProductCriteria {
        category: Selection::Only(String::from("Bombas")),
        price_order: SortOrder::Asc,
        ..ProductCriteria::default()
    };

    assert!(select_products(&catalog, &criteria).is_empty());
}

#[test]
fn test_price_only_ordering() {
    let catalog: Vec<Product> = create_test_catalog();
    let criteria: ProductCriteria = ProductCriteria {
        price_order: SortOrder::Desc,
        ..ProductCriteria::default()
    };

    assert_eq!(ids(&select_products(&catalog, &criteria)), vec!["e", "b", "a"]);
}

#[test]
fn test_duration_only_ordering() {
    let catalog: Vec<Product> = create_test_catalog();
    let criteria: ProductCriteria = ProductCriteria {
        duration_order: SortOrder::Asc,
        ..ProductCriteria::default()
    };

    assert_eq!(ids(&select_products(&catalog, &criteria)), vec!["a", "e", "b"]);
}

#[test]
fn test_best_value_first() {
    // A: 10 / 5 = 2.0 per second, B: 20 / 20 = 1.0 per second
    let catalog: Vec<Product> = vec![
        create_test_product("A", "Tortas", None, 10.0, Some(5)),
        create_test_product("B", "Tortas", None, 20.0, Some(20)),
    ];
    let criteria: ProductCriteria = ProductCriteria {
        price_order: SortOrder::Asc,
        duration_order: SortOrder::Desc,
        ..ProductCriteria::default()
    };

    assert_eq!(ids(&select_products(&catalog, &criteria)), vec!["B", "A"]);
}

#[test]
fn test_worst_value_first() {
    let catalog: Vec<Product> = vec![
        create_test_product("A", "Tortas", None, 10.0, Some(5)),
        create_test_product("B", "Tortas", None, 20.0, Some(20)),
    ];
    let criteria: ProductCriteria = ProductCriteria {
        price_order: SortOrder::Desc,
        duration_order: SortOrder::Asc,
        ..ProductCriteria::default()
    };

    assert_eq!(ids(&select_products(&catalog, &criteria)), vec!["A", "B"]);
}

#[test]
fn test_same_direction_orders_by_duration_then_price() {
    let catalog: Vec<Product> = vec![
        create_test_product("x", "Tortas", None, 50.0, Some(10)),
        create_test_product("y", "Tortas", None, 15.0, Some(10)),
        create_test_product("z", "Tortas", None, 99.0, Some(3)),
    ];
    let criteria: ProductCriteria = ProductCriteria {
        price_order: SortOrder::Asc,
        duration_order: SortOrder::Asc,
        ..ProductCriteria::default()
    };

    assert_eq!(ids(&select_products(&catalog, &criteria)), vec!["z", "y", "x"]);
}

#[test]
fn test_categories_are_distinct_and_sorted() {
    let catalog: Vec<Product> = create_test_catalog();

    assert_eq!(categories(&catalog), vec!["Bombas", "Fumaça", "Tortas"]);
}
