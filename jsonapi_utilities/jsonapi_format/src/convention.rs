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

use convert_case::{Boundary, Case, Casing};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Word boundaries used to split keys. Digits remain attached to a preceding lower case
/// letter so `address2Line` splits as `address2` and `Line`.
const BOUNDARIES: [Boundary; 8] = [
    Boundary::Hyphen,
    Boundary::Underscore,
    Boundary::Space,
    Boundary::LowerUpper,
    Boundary::DigitUpper,
    Boundary::DigitLower,
    Boundary::UpperDigit,
    Boundary::Acronym,
];

/// Supported key naming styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseConvention {
    /// `camelCase`
    Camel,
    /// `kebab-case`
    Kebab,
    /// `snake_case`
    Snake,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' must be one of 'kebab-case', 'snake_case', 'camelCase'")]
pub struct InvalidCaseConvention(pub String);

impl CaseConvention {
    pub const ALL: [CaseConvention; 3] = [
        CaseConvention::Camel,
        CaseConvention::Kebab,
        CaseConvention::Snake,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseConvention::Camel => "camelCase",
            CaseConvention::Kebab => "kebab-case",
            CaseConvention::Snake => "snake_case",
        }
    }

    /// Rewrite a key in this convention, without memoization.
    pub fn apply(&self, key: &str) -> String {
        if key.is_empty() {
            return String::new();
        }
        key.with_boundaries(&BOUNDARIES).to_case((*self).into())
    }
}

impl Display for CaseConvention {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseConvention {
    type Err = InvalidCaseConvention;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "camelCase" => Ok(CaseConvention::Camel),
            "kebab-case" => Ok(CaseConvention::Kebab),
            "snake_case" => Ok(CaseConvention::Snake),
            ow => Err(InvalidCaseConvention(ow.to_string())),
        }
    }
}

impl From<CaseConvention> for Case {
    fn from(convention: CaseConvention) -> Self {
        match convention {
            CaseConvention::Camel => Case::Camel,
            CaseConvention::Kebab => Case::Kebab,
            CaseConvention::Snake => Case::Snake,
        }
    }
}
