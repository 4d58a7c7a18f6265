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

use serde_json::json;

use crate::{
    Document, ErrorDocument, ErrorObject, JsonApiObject, Linkage, PrimaryData, RelationshipData,
    ResourceObject,
};

#[test]
fn absent_and_null_data_differ() {
    let absent: Document = serde_json::from_value(json!({ "meta": { "count": 0 } })).unwrap();
    assert_eq!(absent.data, None);

    let null: Document = serde_json::from_value(json!({ "data": null })).unwrap();
    assert_eq!(null.data, Some(PrimaryData::Null));

    assert_eq!(serde_json::to_value(&null).unwrap(), json!({ "data": null }));
    assert_eq!(serde_json::to_value(&absent).unwrap(), json!({ "meta": { "count": 0 } }));
}

#[test]
fn read_single_resource() {
    let doc: Document = serde_json::from_value(json!({
        "jsonapi": { "version": "1.0" },
        "data": {
            "type": "article",
            "id": "1",
            "attributes": { "title": "T" },
            "relationships": {
                "author": { "data": { "type": "people", "id": "2" } },
                "tags": { "data": [] },
                "editor": { "data": null },
                "reviews": { "links": { "related": "/reviews" } }
            }
        }
    }))
    .unwrap();

    assert_eq!(doc.jsonapi, Some(JsonApiObject::default()));
    let resources = doc.data.as_ref().map(PrimaryData::resources).unwrap();
    assert_eq!(resources.len(), 1);
    let article = &resources[0];
    assert_eq!(article.identifier(), "article-1");

    let relationships = article.relationships.as_ref().unwrap();
    assert_eq!(
        relationships["author"].data,
        Some(RelationshipData::One(Linkage::new("people", "2")))
    );
    assert_eq!(relationships["tags"].data, Some(RelationshipData::Many(vec![])));
    assert_eq!(relationships["editor"].data, Some(RelationshipData::Null));
    assert_eq!(relationships["reviews"].data, None);
}

#[test]
fn numeric_identifiers_accepted() {
    let resource: ResourceObject =
        serde_json::from_value(json!({ "type": "people", "id": 12 })).unwrap();
    assert_eq!(resource.id.as_deref(), Some("12"));

    let bad = serde_json::from_value::<ResourceObject>(json!({ "type": "people", "id": [1] }));
    assert!(bad.is_err());
}

#[test]
fn write_resource_omits_absent_fields() {
    let resource = ResourceObject::new("people", Some("1".to_string()));
    assert_eq!(
        serde_json::to_value(&resource).unwrap(),
        json!({ "type": "people", "id": "1" })
    );
    assert!(!resource.has_attributes());
}

#[test]
fn write_error_document() {
    let doc = ErrorDocument {
        errors: vec![ErrorObject {
            title: Some("Error".to_string()),
            detail: Some("boom".to_string()),
            ..Default::default()
        }],
    };
    assert_eq!(
        serde_json::to_value(&doc).unwrap(),
        json!({ "errors": [{ "title": "Error", "detail": "boom" }] })
    );
}
