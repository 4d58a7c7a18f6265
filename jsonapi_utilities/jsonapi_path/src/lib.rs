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

//! Helpers for navigating and reshaping [`serde_json::Value`] trees.
//!
//! Paths are written with `.` separators and optional bracketed indices, for example
//! `author.id` or `tags[0].name`.

mod path;
mod value;

pub use path::{get, set, PathSegments};
pub use value::{is_empty, is_truthy, omit, pick, to_js_string};
