// Copyright 2015-2024 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::str::FromStr;

use jsonapi_num::non_zero_usize;

use crate::{CaseConvention, CaseConverter, InvalidCaseConvention};

#[test]
fn parse_conventions() {
    assert_eq!(
        CaseConvention::from_str("camelCase"),
        Ok(CaseConvention::Camel)
    );
    assert_eq!(
        CaseConvention::from_str("kebab-case"),
        Ok(CaseConvention::Kebab)
    );
    assert_eq!(
        CaseConvention::from_str("snake_case"),
        Ok(CaseConvention::Snake)
    );
    assert_eq!(
        CaseConvention::from_str("PascalCase"),
        Err(InvalidCaseConvention("PascalCase".to_string()))
    );
    for convention in CaseConvention::ALL {
        assert_eq!(CaseConvention::from_str(convention.as_str()), Ok(convention));
    }
}

#[test]
fn to_kebab() {
    let convention = CaseConvention::Kebab;
    assert_eq!(convention.apply("firstName"), "first-name");
    assert_eq!(convention.apply("first_name"), "first-name");
    assert_eq!(convention.apply("created"), "created");
    assert_eq!(convention.apply("articleAuthorName"), "article-author-name");
}

#[test]
fn to_snake() {
    let convention = CaseConvention::Snake;
    assert_eq!(convention.apply("firstName"), "first_name");
    assert_eq!(convention.apply("first-name"), "first_name");
    assert_eq!(convention.apply("articleAuthor"), "article_author");
}

#[test]
fn to_camel() {
    let convention = CaseConvention::Camel;
    assert_eq!(convention.apply("first_name"), "firstName");
    assert_eq!(convention.apply("first-name"), "firstName");
    assert_eq!(convention.apply("firstName"), "firstName");
    assert_eq!(convention.apply("id"), "id");
}

#[test]
fn empty_key() {
    for convention in CaseConvention::ALL {
        assert_eq!(convention.apply(""), "");
    }
}

#[test]
fn bounded_memo() {
    let converter = CaseConverter::new(Some(non_zero_usize!(2)));
    assert_eq!(
        converter.convert(CaseConvention::Kebab, "firstName"),
        "first-name"
    );
    assert_eq!(
        converter.convert(CaseConvention::Kebab, "lastName"),
        "last-name"
    );
    assert_eq!(
        converter.convert(CaseConvention::Kebab, "middleName"),
        "middle-name"
    );
    assert_eq!(converter.memoized(CaseConvention::Kebab), 2);
    assert_eq!(converter.memoized(CaseConvention::Snake), 0);
    assert_eq!(
        converter.convert(CaseConvention::Kebab, "firstName"),
        "first-name"
    );
}

#[test]
fn unbounded_memo() {
    let converter = CaseConverter::new(None);
    for key in ["a_b", "c_d", "e_f", "a_b"] {
        converter.convert(CaseConvention::Camel, key);
    }
    assert_eq!(converter.memoized(CaseConvention::Camel), 3);
    assert_eq!(converter.convert(CaseConvention::Camel, "e_f"), "eF");
}
