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

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use jsonapi_model::JsonObject;
use jsonapi_utilities::format::CaseConvention;

use super::callback::{AfterDeserializeFn, BeforeSerializeFn, Callback};
use super::{OptionsValue, Relationship, SchemaOptions};

/// Overrides for the registered options, keyed by type name.
pub type Overrides = HashMap<String, SchemaOverride>;

/// A partial set of schema options. Each field that is set replaces the corresponding
/// registered option for the duration of one call.
#[derive(Debug, Clone, Default)]
pub struct SchemaOverride {
    pub id: Option<String>,
    pub blacklist: Option<Vec<String>>,
    pub whitelist: Option<Vec<String>>,
    pub blacklist_on_deserialize: Option<Vec<String>>,
    pub whitelist_on_deserialize: Option<Vec<String>>,
    pub links: Option<OptionsValue>,
    pub meta: Option<OptionsValue>,
    pub top_level_links: Option<OptionsValue>,
    pub top_level_meta: Option<OptionsValue>,
    pub relationships: Option<Vec<(String, Relationship)>>,
    /// `Some(None)` disables case conversion.
    pub convert_case: Option<Option<CaseConvention>>,
    /// `Some(None)` disables case conversion.
    pub unconvert_case: Option<Option<CaseConvention>>,
    pub jsonapi_object: Option<bool>,
    /// `Some(None)` removes the hook.
    pub before_serialize: Option<Option<Callback<BeforeSerializeFn>>>,
    /// `Some(None)` removes the hook.
    pub after_deserialize: Option<Option<Callback<AfterDeserializeFn>>>,
}

impl SchemaOverride {
    pub fn with_whitelist<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_blacklist<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_links(mut self, links: OptionsValue) -> Self {
        self.links = Some(links);
        self
    }

    pub fn with_meta(mut self, meta: OptionsValue) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn with_top_level_links(mut self, links: OptionsValue) -> Self {
        self.top_level_links = Some(links);
        self
    }

    pub fn with_top_level_meta(mut self, meta: OptionsValue) -> Self {
        self.top_level_meta = Some(meta);
        self
    }

    pub fn with_convert_case(mut self, convention: Option<CaseConvention>) -> Self {
        self.convert_case = Some(convention);
        self
    }

    pub fn with_jsonapi_object(mut self, enabled: bool) -> Self {
        self.jsonapi_object = Some(enabled);
        self
    }

    pub fn with_before_serialize<F>(mut self, f: F) -> Self
    where
        F: Fn(&JsonObject) -> JsonObject + Send + Sync + 'static,
    {
        let f: Arc<BeforeSerializeFn> = Arc::new(f);
        self.before_serialize = Some(Some(f.into()));
        self
    }

    pub fn without_before_serialize(mut self) -> Self {
        self.before_serialize = Some(None);
        self
    }

    /// Shallow merge the override over some base options.
    pub fn apply(&self, base: &SchemaOptions) -> SchemaOptions {
        let SchemaOverride {
            id,
            blacklist,
            whitelist,
            blacklist_on_deserialize,
            whitelist_on_deserialize,
            links,
            meta,
            top_level_links,
            top_level_meta,
            relationships,
            convert_case,
            unconvert_case,
            jsonapi_object,
            before_serialize,
            after_deserialize,
        } = self;
        let mut merged = base.clone();
        if let Some(id) = id {
            merged.id = id.clone();
        }
        if let Some(blacklist) = blacklist {
            merged.blacklist = blacklist.clone();
        }
        if let Some(whitelist) = whitelist {
            merged.whitelist = whitelist.clone();
        }
        if let Some(blacklist) = blacklist_on_deserialize {
            merged.blacklist_on_deserialize = blacklist.clone();
        }
        if let Some(whitelist) = whitelist_on_deserialize {
            merged.whitelist_on_deserialize = whitelist.clone();
        }
        if let Some(links) = links {
            merged.links = links.clone();
        }
        if let Some(meta) = meta {
            merged.meta = meta.clone();
        }
        if let Some(links) = top_level_links {
            merged.top_level_links = links.clone();
        }
        if let Some(meta) = top_level_meta {
            merged.top_level_meta = meta.clone();
        }
        if let Some(relationships) = relationships {
            merged.relationships = relationships.clone();
        }
        if let Some(convention) = convert_case {
            merged.convert_case = *convention;
        }
        if let Some(convention) = unconvert_case {
            merged.unconvert_case = *convention;
        }
        if let Some(enabled) = jsonapi_object {
            merged.jsonapi_object = *enabled;
        }
        if let Some(hook) = before_serialize {
            merged.before_serialize = hook.clone();
        }
        if let Some(hook) = after_deserialize {
            merged.after_deserialize = hook.clone();
        }
        merged
    }
}

/// The options to use for a type, taking any override for it into account.
pub(crate) fn overridden<'a>(
    base: &'a SchemaOptions,
    overrides: &Overrides,
    resource_type: &str,
) -> Cow<'a, SchemaOptions> {
    match overrides.get(resource_type) {
        Some(o) => Cow::Owned(o.apply(base)),
        None => Cow::Borrowed(base),
    }
}
