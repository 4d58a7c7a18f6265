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


use jsonapi_model::Document;
use jsonapi_utilities::format::CaseConvention;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ResolutionError, SerializerError};
use crate::schema::{DynamicType, Relationship};
use crate::serializer::Serializer;

fn document(value: Value) -> Document {
    serde_json::from_value(value).expect("Invalid document.")
}

fn blog_serializer() -> Serializer {
    let mut serializer = Serializer::new();
    let article = serializer
        .schema()
        .with_relationship("author", Relationship::new("people"))
        .with_relationship("comments", Relationship::new("comment"));
    serializer.register("article", article).unwrap();
    serializer.register("people", serializer.schema()).unwrap();
    serializer.register("comment", serializer.schema()).unwrap();
    serializer
}

fn article_document() -> Value {
    json!({
        "data": {
            "type": "article",
            "id": "1",
            "attributes": { "title": "JSON:API", "body": "Text" },
            "relationships": {
                "author": { "data": { "type": "people", "id": "2" } },
                "comments": {
                    "data": [
                        { "type": "comment", "id": "5" },
                        { "type": "comment", "id": "12" }
                    ]
                }
            }
        }
    })
}

#[test]
fn round_trip_without_relationships() {
    let mut serializer = Serializer::new();
    serializer.register("article", serializer.schema()).unwrap();

    let data = json!({ "id": "1", "title": "JSON:API", "tags": ["a", "b"] });
    let doc = serializer.serialize("article", &data).unwrap();
    let result = serializer.deserialize("article", &doc).unwrap();
    assert_eq!(result, data);
}

#[test]
fn relationships_without_included() {
    let serializer = blog_serializer();
    let result = serializer
        .deserialize("article", &document(article_document()))
        .unwrap();
    assert_eq!(
        result,
        json!({
            "id": "1",
            "title": "JSON:API",
            "body": "Text",
            "author": "2",
            "comments": ["5", "12"]
        })
    );
}

#[test]
fn null_relationship() {
    let serializer = blog_serializer();
    let doc = document(json!({
        "data": {
            "type": "article",
            "id": "1",
            "relationships": {
                "author": { "data": null },
                "comments": { "links": { "related": "/articles/1/comments" } }
            }
        }
    }));
    let result = serializer.deserialize("article", &doc).unwrap();
    assert_eq!(result, json!({ "id": "1", "author": null }));
}

#[test]
fn relationships_from_included() {
    let serializer = blog_serializer();
    let mut doc = article_document();
    doc["included"] = json!([
        { "type": "people", "id": "2", "attributes": { "name": "Ann" } },
        { "type": "comment", "id": "5", "attributes": { "body": "First" } }
    ]);
    let result = serializer.deserialize("article", &document(doc)).unwrap();
    assert_eq!(
        result,
        json!({
            "id": "1",
            "title": "JSON:API",
            "body": "Text",
            "author": { "id": "2", "name": "Ann" },
            "comments": [{ "id": "5", "body": "First" }, "12"]
        })
    );
}

#[test]
fn included_uses_relationship_schema() {
    let mut serializer = Serializer::new();
    let article = serializer
        .schema()
        .with_relationship("author", Relationship::new("people").with_schema("public"));
    serializer.register("article", article).unwrap();
    serializer.register("people", serializer.schema()).unwrap();
    serializer
        .register_schema(
            "people",
            "public",
            serializer.schema().with_blacklist_on_deserialize(["email"]),
        )
        .unwrap();

    let doc = document(json!({
        "data": {
            "type": "article",
            "id": "1",
            "relationships": { "author": { "data": { "type": "people", "id": "2" } } }
        },
        "included": [
            {
                "type": "people",
                "id": "2",
                "attributes": { "name": "Ann", "email": "ann@example.com" }
            }
        ]
    }));
    let result = serializer.deserialize("article", &doc).unwrap();
    assert_eq!(result, json!({ "id": "1", "author": { "id": "2", "name": "Ann" } }));
}

#[test]
fn alternative_key_with_included() {
    let mut serializer = Serializer::new();
    let article = serializer.schema().with_relationship(
        "author",
        Relationship::new("people").with_alternative_key("authorId"),
    );
    serializer.register("article", article).unwrap();
    serializer.register("people", serializer.schema()).unwrap();

    let doc = document(json!({
        "data": {
            "type": "article",
            "id": "1",
            "relationships": { "author": { "data": { "type": "people", "id": "2" } } }
        },
        "included": [{ "type": "people", "id": "2", "attributes": { "name": "Ann" } }]
    }));
    let result = serializer.deserialize("article", &doc).unwrap();
    assert_eq!(
        result,
        json!({
            "id": "1",
            "authorId": "2",
            "author": { "id": "2", "name": "Ann" }
        })
    );
}

#[test]
fn alternative_key_path_without_included() {
    let mut serializer = Serializer::new();
    let article = serializer.schema().with_relationship(
        "author",
        Relationship::new("people").with_alternative_key("author.id"),
    );
    serializer.register("article", article).unwrap();
    serializer.register("people", serializer.schema()).unwrap();

    let doc = document(json!({
        "data": {
            "type": "article",
            "id": "1",
            "relationships": { "author": { "data": { "type": "people", "id": "2" } } }
        }
    }));
    let result = serializer.deserialize("article", &doc).unwrap();
    assert_eq!(result, json!({ "id": "1", "author": { "id": "2" } }));
}

#[test]
fn relationship_names_are_plain_keys() {
    let serializer = blog_serializer();
    let doc = document(json!({
        "data": {
            "type": "article",
            "id": "1",
            "relationships": {
                "x.20000000": { "data": { "type": "people", "id": "2" } },
                "tags[999999999999999]": { "data": null }
            }
        }
    }));
    let result = serializer.deserialize("article", &doc).unwrap();
    assert_eq!(
        result,
        json!({ "id": "1", "x.20000000": "2", "tags[999999999999999]": null })
    );

    let doc = document(json!({
        "data": { "type": "article", "id": "1", "relationships": {
            "x.20000000": { "data": { "type": "people", "id": "2" } }
        } },
        "included": [{ "type": "people", "id": "2", "attributes": { "name": "Ann" } }]
    }));
    let result = serializer.deserialize("article", &doc).unwrap();
    assert_eq!(
        result,
        json!({ "id": "1", "x.20000000": { "id": "2", "name": "Ann" } })
    );
}

#[test]
fn circular_included_resources() {
    let mut serializer = Serializer::new();
    let article = serializer
        .schema()
        .with_relationship("author", Relationship::new("people"));
    let people = serializer
        .schema()
        .with_relationship("articles", Relationship::new("article"));
    serializer.register("article", article).unwrap();
    serializer.register("people", people).unwrap();

    let doc = document(json!({
        "data": {
            "type": "article",
            "id": "1",
            "attributes": { "title": "Cycles" },
            "relationships": { "author": { "data": { "type": "people", "id": "2" } } }
        },
        "included": [
            {
                "type": "people",
                "id": "2",
                "attributes": { "name": "Ann" },
                "relationships": { "articles": { "data": [{ "type": "article", "id": "1" }] } }
            },
            {
                "type": "article",
                "id": "1",
                "attributes": { "title": "Cycles" },
                "relationships": { "author": { "data": { "type": "people", "id": "2" } } }
            }
        ]
    }));
    let result = serializer.deserialize("article", &doc).unwrap();
    assert_eq!(
        result,
        json!({
            "id": "1",
            "title": "Cycles",
            "author": {
                "id": "2",
                "name": "Ann",
                "articles": [{ "id": "1", "title": "Cycles", "author": "2" }]
            }
        })
    );
}

#[test]
fn custom_linkage_deserializer() {
    let mut serializer = Serializer::new();
    let article = serializer.schema().with_relationship(
        "author",
        Relationship::new("people").with_deserialize(|linkage| {
            json!({ "kind": linkage.resource_type, "key": linkage.id })
        }),
    );
    serializer.register("article", article).unwrap();
    serializer.register("people", serializer.schema()).unwrap();

    let doc = document(json!({
        "data": {
            "type": "article",
            "id": "1",
            "relationships": { "author": { "data": { "type": "people", "id": "2" } } }
        },
        "included": []
    }));
    let result = serializer.deserialize("article", &doc).unwrap();
    assert_eq!(
        result,
        json!({ "id": "1", "author": { "kind": "people", "key": "2" } })
    );
}

#[test]
fn unconvert_case() {
    let mut serializer = Serializer::new();
    let article = serializer
        .schema()
        .with_relationship("main_author", Relationship::new("people"))
        .with_unconvert_case(CaseConvention::Snake);
    serializer.register("article", article).unwrap();
    serializer.register("people", serializer.schema()).unwrap();

    let doc = document(json!({
        "data": {
            "type": "article",
            "id": "1",
            "attributes": { "firstTitle": "A", "pageCount": 3, "extra": { "innerKey": true } },
            "relationships": { "mainAuthor": { "data": { "type": "people", "id": "2" } } }
        }
    }));
    let result = serializer.deserialize("article", &doc).unwrap();
    assert_eq!(
        result,
        json!({
            "id": "1",
            "first_title": "A",
            "page_count": 3,
            "extra": { "inner_key": true },
            "main_author": "2"
        })
    );
}

#[test]
fn convert_then_unconvert_restores_keys() {
    let mut serializer = Serializer::new();
    let options = serializer
        .schema()
        .with_convert_case(CaseConvention::Kebab)
        .with_unconvert_case(CaseConvention::Camel);
    serializer.register("article", options).unwrap();

    let data = json!({ "id": "1", "firstName": "A", "lastName": "B" });
    let doc = serializer.serialize("article", &data).unwrap();
    let wire = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        wire["data"]["attributes"],
        json!({ "first-name": "A", "last-name": "B" })
    );
    assert_eq!(serializer.deserialize("article", &doc).unwrap(), data);
}

#[test]
fn whitelist_and_blacklist_on_deserialize() {
    let mut serializer = Serializer::new();
    serializer
        .register(
            "article",
            serializer
                .schema()
                .with_whitelist_on_deserialize(["title", "body"]),
        )
        .unwrap();
    serializer
        .register_schema(
            "article",
            "restricted",
            serializer
                .schema()
                .with_whitelist_on_deserialize(["title", "body"])
                .with_blacklist_on_deserialize(["body"]),
        )
        .unwrap();

    let doc = document(json!({
        "data": {
            "type": "article",
            "id": "1",
            "attributes": { "title": "T", "body": "B", "secret": "S" }
        }
    }));
    assert_eq!(
        serializer.deserialize("article", &doc).unwrap(),
        json!({ "id": "1", "title": "T", "body": "B" })
    );
    assert_eq!(
        serializer
            .deserialize_with_schema("article", &doc, "restricted")
            .unwrap(),
        json!({ "id": "1", "title": "T" })
    );
}

#[test]
fn links_meta_and_after_hook() {
    let mut serializer = Serializer::new();
    let options = serializer.schema().with_after_deserialize(|mut value| {
        value["seen"] = Value::Bool(true);
        value
    });
    serializer.register("article", options).unwrap();

    let doc = document(json!({
        "data": {
            "type": "article",
            "id": "1",
            "attributes": { "title": "T" },
            "links": { "self": "/articles/1" },
            "meta": { "rev": 2 }
        }
    }));
    assert_eq!(
        serializer.deserialize("article", &doc).unwrap(),
        json!({
            "id": "1",
            "title": "T",
            "links": { "self": "/articles/1" },
            "meta": { "rev": 2 },
            "seen": true
        })
    );
}

#[test]
fn custom_id_field() {
    let mut serializer = Serializer::new();
    serializer
        .register("article", serializer.schema().with_id("_id"))
        .unwrap();
    let doc = document(json!({
        "data": { "type": "article", "id": "abc", "attributes": { "title": "T" } }
    }));
    assert_eq!(
        serializer.deserialize("article", &doc).unwrap(),
        json!({ "_id": "abc", "title": "T" })
    );
}

#[test]
fn empty_primary_data() {
    let serializer = blog_serializer();
    let absent = document(json!({ "meta": { "count": 0 } }));
    let null = document(json!({ "data": null }));
    assert_eq!(serializer.deserialize("article", &absent).unwrap(), json!({}));
    assert_eq!(serializer.deserialize("article", &null).unwrap(), json!({}));
    let empty = document(json!({ "data": [] }));
    assert_eq!(serializer.deserialize("article", &empty).unwrap(), json!([]));
}

#[test]
fn unregistered_type_or_schema() {
    let serializer = blog_serializer();
    let doc = document(article_document());
    let result = serializer.deserialize("unknown", &doc);
    assert!(matches!(
        result,
        Err(SerializerError::Resolution(ResolutionError::UnregisteredType(name)))
            if name == "unknown"
    ));
    let result = serializer.deserialize_with_schema("article", &doc, "missing");
    assert!(matches!(
        result,
        Err(SerializerError::Resolution(ResolutionError::UnregisteredSchema { .. }))
    ));
}

#[test]
fn dynamic_type() {
    let serializer = blog_serializer();
    let dynamic = DynamicType::path("type");
    let doc = document(json!({
        "data": [
            { "type": "article", "id": "1", "attributes": { "title": "T" } },
            { "type": "people", "id": "2", "attributes": { "name": "Ann" } }
        ]
    }));
    assert_eq!(
        serializer.deserialize(&dynamic, &doc).unwrap(),
        json!([{ "id": "1", "title": "T" }, { "id": "2", "name": "Ann" }])
    );

    let unknown = document(json!({ "data": { "type": "video", "id": "3" } }));
    let result = serializer.deserialize(&dynamic, &unknown);
    assert!(matches!(
        result,
        Err(SerializerError::Resolution(ResolutionError::UnregisteredType(name))) if name == "video"
    ));
}

#[test]
fn dynamic_type_unresolved() {
    let serializer = blog_serializer();
    let dynamic = DynamicType::path("meta.kind");
    let doc = document(json!({ "data": { "type": "article", "id": "1" } }));
    let result = serializer.deserialize(&dynamic, &doc);
    assert!(matches!(
        result,
        Err(SerializerError::Resolution(ResolutionError::UnresolvableType(_)))
    ));
}

#[derive(Debug, PartialEq, Deserialize)]
struct Article {
    id: String,
    title: String,
    author: String,
}

#[test]
fn deserialize_into_typed_value() {
    let serializer = blog_serializer();
    let article: Article = serializer
        .deserialize_into("article", &document(article_document()))
        .unwrap();
    assert_eq!(
        article,
        Article {
            id: "1".to_string(),
            title: "JSON:API".to_string(),
            author: "2".to_string(),
        }
    );
}

#[tokio::test]
async fn deserialize_async_preserves_order() {
    let serializer = blog_serializer();
    let doc = document(json!({
        "data": [
            { "type": "article", "id": "1", "attributes": { "title": "A" } },
            { "type": "article", "id": "2", "attributes": { "title": "B" } },
            { "type": "article", "id": "3", "attributes": { "title": "C" } }
        ]
    }));
    let sync = serializer.deserialize("article", &doc).unwrap();
    let result = serializer.deserialize_async("article", &doc).await.unwrap();
    assert_eq!(result, sync);
    assert_eq!(
        result,
        json!([
            { "id": "1", "title": "A" },
            { "id": "2", "title": "B" },
            { "id": "3", "title": "C" }
        ])
    );

    let single = document(article_document());
    assert_eq!(
        serializer.deserialize_async("article", &single).await.unwrap(),
        serializer.deserialize("article", &single).unwrap()
    );
}

#[tokio::test]
async fn deserialize_async_stops_on_error() {
    let serializer = blog_serializer();
    let doc = document(json!({
        "data": [
            { "type": "article", "id": "1" },
            { "type": "video", "id": "2" }
        ]
    }));
    let result = serializer
        .deserialize_async(&DynamicType::path("type"), &doc)
        .await;
    assert!(matches!(
        result,
        Err(SerializerError::Resolution(ResolutionError::UnregisteredType(_)))
    ));
}
