//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every handler of the inbound HTTP layer (posts,
//! comments, health) and the DTO schemas they exchange. Domain error types are
//! described through the wrappers in [`crate::inbound::http::schemas`] so the
//! domain stays free of utoipa.
//!
//! The document backs Swagger UI in debug builds and is exported with
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::posts_dto::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, PostResponse, UserResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Discussion board API",
        description = "Posts, comments, and vote counters over JSON, plus health probes.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::upvote_post,
        crate::inbound::http::posts::downvote_post,
        crate::inbound::http::posts::create_comment,
        crate::inbound::http::posts::upvote_comment,
        crate::inbound::http::posts::downvote_comment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        PostResponse,
        CommentResponse,
        UserResponse,
        CreatePostRequest,
        CreateCommentRequest,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "posts", description = "Reading, creating, and voting on posts"),
        (name = "comments", description = "Creating and voting on comments"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema and path registration.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[rstest]
    #[case("PostResponse", &["id", "title", "content", "user", "upvotes", "downvotes", "comments"])]
    #[case("CommentResponse", &["id", "content", "upvotes", "downvotes", "user"])]
    #[case("CreatePostRequest", &["title", "content", "userId"])]
    fn board_schemas_expose_wire_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");

        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    #[case("/api/posts")]
    #[case("/api/posts/{id}")]
    #[case("/api/posts/{id}/upvote")]
    #[case("/api/posts/{id}/comments")]
    #[case("/api/posts/{postId}/comments/{commentId}/downvote")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }
}
