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


use std::error::Error;

use jsonapi::{
    serialize_error, CaseConvention, DynamicType, NativeError, OptionsValue, Relationship,
    SerializeOptions, Serializer,
};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn init_logging() -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = EnvFilter::from_default_env()
        .add_directive(LevelFilter::INFO.into())
        .add_directive("jsonapi=trace".parse()?);
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn blog() -> Result<Serializer, Box<dyn Error + Send + Sync>> {
    let mut serializer = Serializer::new();

    let article = serializer
        .schema()
        .with_blacklist(["updated"])
        .with_links(OptionsValue::default().with_unary("self", |data| {
            data["id"]
                .as_str()
                .map(|id| format!("/articles/{id}").into())
        }))
        .with_top_level_meta(OptionsValue::unary(|extra| {
            let mut meta = serde_json::Map::new();
            meta.insert("count".to_string(), extra["count"].clone());
            meta
        }))
        .with_relationship("author", Relationship::new("people"))
        .with_relationship("comments", Relationship::new("comment"))
        .with_convert_case(CaseConvention::Kebab)
        .with_unconvert_case(CaseConvention::Camel);
    serializer.register("article", article)?;

    serializer.register_value(
        "people",
        None,
        &json!({
            "links": { "profile": "/people" },
            "convertCase": "kebab-case",
            "unconvertCase": "camelCase"
        }),
    )?;
    serializer.register_value(
        "comment",
        None,
        &json!({
            "relationships": { "author": { "type": "people" } }
        }),
    )?;
    Ok(serializer)
}

fn articles() -> Value {
    json!([
        {
            "id": "1",
            "title": "JSON:API paints my bikeshed!",
            "body": "The shortest article. Ever.",
            "updated": "2015-05-22T14:56:28.000Z",
            "author": { "id": "2", "firstName": "Dan", "lastName": "Gebhardt" },
            "comments": [
                { "id": "5", "body": "First!", "author": "2" },
                {
                    "id": "12",
                    "body": "I like XML better",
                    "author": { "id": "9", "firstName": "Ann" }
                }
            ]
        },
        {
            "id": "2",
            "title": "Second article",
            "body": "More text.",
            "author": "9",
            "comments": []
        }
    ])
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    init_logging()?;

    let serializer = blog()?;
    let data = articles();
    let options = SerializeOptions::default().with_extra_data(json!({ "count": 2 }));

    let document = serializer.serialize_with("article", &data, &options)?;
    println!("{}", serde_json::to_string_pretty(&document)?);

    let concurrent = serializer.serialize_with_async("article", &data, &options).await?;
    let same = concurrent == document;
    info!(
        same,
        included = document.included().len(),
        "Serialized the articles."
    );

    let deserialized = serializer.deserialize("article", &document)?;
    println!("{}", serde_json::to_string_pretty(&deserialized)?);

    let dynamic = DynamicType::path("kind");
    let feed = json!([
        { "kind": "article", "id": "3", "title": "Mixed" },
        { "kind": "people", "id": "4", "firstName": "Kim" }
    ]);
    let mixed = serializer.serialize(&dynamic, &feed)?;
    println!("{}", serde_json::to_string_pretty(&mixed)?);

    let not_found = NativeError::new("No article with ID 42.")
        .with_status(404)
        .with_title("Not Found");
    println!(
        "{}",
        serde_json::to_string_pretty(&serialize_error(not_found)?)?
    );
    Ok(())
}
