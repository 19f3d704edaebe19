// ABOUTME: Tests for the static tool catalog and name resolution
// ABOUTME: Asserts catalog/dispatch parity and schema well-formedness
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]

use std::collections::HashSet;

use meta_ads_mcp_server::tools::{catalog, ToolId};

#[test]
fn catalog_has_exactly_nine_unique_tools() {
    let entries = catalog();
    assert_eq!(entries.len(), 9);

    let names: HashSet<&str> = entries.iter().map(|def| def.name).collect();
    assert_eq!(names.len(), 9, "tool names must be unique");
}

#[test]
fn every_catalog_name_resolves_to_a_tool_id() {
    for def in catalog() {
        let tool = ToolId::from_name(def.name)
            .unwrap_or_else(|| panic!("catalog entry {} is not dispatchable", def.name));
        assert_eq!(tool.name(), def.name);
    }
}

#[test]
fn every_tool_id_appears_in_the_catalog() {
    let entries = catalog();
    for tool in ToolId::ALL {
        assert!(
            entries.iter().any(|def| def.name == tool.name()),
            "{} missing from catalog",
            tool.name()
        );
    }
}

#[test]
fn unknown_names_do_not_resolve() {
    assert!(ToolId::from_name("list_ad_account").is_none());
    assert!(ToolId::from_name("").is_none());
    assert!(ToolId::from_name("LIST_AD_ACCOUNTS").is_none());
}

#[test]
fn schemas_are_well_formed_objects() {
    for def in catalog() {
        assert!(!def.description.is_empty());
        assert_eq!(def.input_schema["type"], "object", "{}", def.name);
        assert!(def.input_schema["properties"].is_object(), "{}", def.name);
        assert!(def.input_schema["required"].is_array(), "{}", def.name);
    }
}

#[test]
fn required_arguments_match_the_adapter_contract() {
    let required_of = |name: &str| -> Vec<String> {
        catalog()
            .into_iter()
            .find(|def| def.name == name)
            .unwrap()
            .input_schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_owned())
            .collect()
    };

    assert!(required_of("list_ad_accounts").is_empty());
    assert!(required_of("list_campaigns").is_empty());
    assert_eq!(required_of("get_campaign_insights"), ["campaign_id"]);
    assert!(required_of("get_account_insights").is_empty());
    assert_eq!(required_of("search_campaigns"), ["query"]);
    assert_eq!(required_of("list_adsets"), ["campaign_id"]);
    assert_eq!(required_of("get_adset_insights"), ["adset_id"]);
    assert_eq!(required_of("list_ads"), ["adset_id"]);
    assert_eq!(required_of("get_ad_insights"), ["ad_id"]);
}

#[test]
fn required_fields_are_declared_properties() {
    for def in catalog() {
        let properties = def.input_schema["properties"].as_object().unwrap();
        for required in def.input_schema["required"].as_array().unwrap() {
            let key = required.as_str().unwrap();
            assert!(
                properties.contains_key(key),
                "{} requires undeclared property {key}",
                def.name
            );
        }
    }
}
