use axum::{Json, response::Html};
use maud::{DOCTYPE, PreEscaped, html};
use serde_json::{Value, json};

const SWAGGER_UI_DIST: &str = "https://unpkg.com/swagger-ui-dist@5.9.0";
const OPENAPI_PATH: &str = "/docs/openapi.json";

pub async fn swagger_ui() -> Html<String> {
    Html(swagger_page())
}

pub async fn openapi() -> Json<Value> {
    Json(openapi_document())
}

fn swagger_page() -> String {
    let boot = format!(
        "window.onload = () => {{ window.ui = SwaggerUIBundle({{ \
         url: '{OPENAPI_PATH}', dom_id: '#swagger-ui', deepLinking: true }}); }};"
    );

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Movie catalog API" }
                link rel="stylesheet" href=(format!("{SWAGGER_UI_DIST}/swagger-ui.css"));
            }
            body {
                div id="swagger-ui" {}
                script src=(format!("{SWAGGER_UI_DIST}/swagger-ui-bundle.js")) {}
                script { (PreEscaped(boot)) }
            }
        }
    }
    .into_string()
}

pub fn openapi_document() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Movie catalog API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Movies, genres and the language lookup they reference."
        },
        "servers": [{ "url": "/" }],
        "tags": [
            { "name": "Movies" },
            { "name": "Genres" },
            { "name": "Languages" }
        ],
        "paths": {
            "/movies": {
                "get": {
                    "tags": ["Movies"],
                    "summary": "List movies ordered by title",
                    "parameters": [{
                        "name": "genre",
                        "in": "query",
                        "required": false,
                        "description": "Only movies whose genre has this name (case-insensitive)",
                        "schema": { "type": "string" }
                    }],
                    "responses": {
                        "200": json_response("Movies with genre and language", array_of("Movie")),
                        "500": error_response("Data store failure")
                    }
                },
                "post": {
                    "tags": ["Movies"],
                    "summary": "Create a movie",
                    "requestBody": request_body("NewMovie"),
                    "responses": {
                        "201": { "description": "Created" },
                        "400": error_response("Missing field or malformed release_date"),
                        "409": error_response("Title already used (case-insensitive)"),
                        "500": error_response("Data store failure")
                    }
                }
            },
            "/movies/{segment}": {
                "get": {
                    "tags": ["Movies"],
                    "summary": "Fetch a movie by numeric id, or filter by genre name",
                    "parameters": [path_param("segment", "string")],
                    "responses": {
                        "200": json_response(
                            "A movie (numeric segment) or the movies of a genre",
                            json!({ "oneOf": [schema_ref("Movie"), array_of("Movie")] })
                        ),
                        "404": error_response("No movie with that id"),
                        "500": error_response("Data store failure")
                    }
                },
                "put": {
                    "tags": ["Movies"],
                    "summary": "Update the supplied fields of a movie",
                    "parameters": [path_param("segment", "integer")],
                    "requestBody": request_body("MovieChanges"),
                    "responses": {
                        "200": { "description": "Updated" },
                        "400": error_response("Malformed release_date"),
                        "404": error_response("No movie with that id"),
                        "409": error_response("Title already used (case-insensitive)"),
                        "500": error_response("Data store failure")
                    }
                },
                "delete": {
                    "tags": ["Movies"],
                    "summary": "Delete a movie",
                    "parameters": [path_param("segment", "integer")],
                    "responses": {
                        "200": { "description": "Deleted" },
                        "404": error_response("No movie with that id"),
                        "500": error_response("Data store failure")
                    }
                }
            },
            "/genres": {
                "get": {
                    "tags": ["Genres"],
                    "summary": "List genres ordered by name",
                    "responses": {
                        "200": json_response("Genres", array_of("Genre")),
                        "500": error_response("Data store failure")
                    }
                },
                "post": {
                    "tags": ["Genres"],
                    "summary": "Create a genre",
                    "requestBody": request_body("GenreName"),
                    "responses": {
                        "201": json_response("The created genre", schema_ref("Genre")),
                        "400": error_response("name is required"),
                        "409": error_response("Name already used (case-insensitive)"),
                        "500": error_response("Data store failure")
                    }
                }
            },
            "/genres/{id}": {
                "get": {
                    "tags": ["Genres"],
                    "summary": "Fetch a genre",
                    "parameters": [path_param("id", "integer")],
                    "responses": {
                        "200": json_response("The genre", schema_ref("Genre")),
                        "404": error_response("No genre with that id"),
                        "500": error_response("Data store failure")
                    }
                },
                "put": {
                    "tags": ["Genres"],
                    "summary": "Rename a genre",
                    "parameters": [path_param("id", "integer")],
                    "requestBody": request_body("GenreName"),
                    "responses": {
                        "200": json_response("The renamed genre", schema_ref("Genre")),
                        "400": error_response("name is required"),
                        "404": error_response("No genre with that id"),
                        "409": error_response("Name used by another genre"),
                        "500": error_response("Data store failure")
                    }
                },
                "delete": {
                    "tags": ["Genres"],
                    "summary": "Delete a genre",
                    "parameters": [path_param("id", "integer")],
                    "responses": {
                        "200": json_response("Confirmation", schema_ref("Message")),
                        "404": error_response("No genre with that id"),
                        "500": error_response("Data store failure")
                    }
                }
            },
            "/languages": {
                "get": {
                    "tags": ["Languages"],
                    "summary": "List languages ordered by name",
                    "responses": {
                        "200": json_response("Languages", array_of("Language")),
                        "500": error_response("Data store failure")
                    }
                }
            }
        },
        "components": { "schemas": schemas() }
    })
}

fn schemas() -> Value {
    let named = json!({
        "type": "object",
        "required": ["id", "name"],
        "properties": {
            "id": { "type": "integer" },
            "name": { "type": "string" }
        }
    });

    json!({
        "Genre": named.clone(),
        "Language": named,
        "Movie": {
            "type": "object",
            "properties": {
                "id": { "type": "integer" },
                "title": { "type": "string" },
                "oscar_count": { "type": "integer" },
                "release_date": { "type": "string", "format": "date" },
                "genre_id": { "type": "integer" },
                "language_id": { "type": "integer" },
                "genre": schema_ref("Genre"),
                "language": schema_ref("Language")
            }
        },
        "NewMovie": {
            "type": "object",
            "required": ["title", "genre_id", "language_id", "oscar_count", "release_date"],
            "properties": movie_input_properties()
        },
        "MovieChanges": {
            "type": "object",
            "properties": movie_input_properties()
        },
        "GenreName": {
            "type": "object",
            "required": ["name"],
            "properties": { "name": { "type": "string" } }
        },
        "Message": {
            "type": "object",
            "properties": { "message": { "type": "string" } }
        }
    })
}

fn movie_input_properties() -> Value {
    json!({
        "title": { "type": "string" },
        "genre_id": { "type": "integer" },
        "language_id": { "type": "integer" },
        "oscar_count": { "type": "integer" },
        "release_date": { "type": "string", "example": "2010-07-16" }
    })
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn array_of(name: &str) -> Value {
    json!({ "type": "array", "items": schema_ref(name) })
}

fn path_param(name: &str, kind: &str) -> Value {
    json!({ "name": name, "in": "path", "required": true, "schema": { "type": kind } })
}

fn request_body(schema: &str) -> Value {
    json!({
        "required": true,
        "content": { "application/json": { "schema": schema_ref(schema) } }
    })
}

fn json_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

fn error_response(description: &str) -> Value {
    json_response(description, schema_ref("Message"))
}
