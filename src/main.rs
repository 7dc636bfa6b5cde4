//! # Params Loader Demo
//!
//! Seeds a book collection and runs the classic loader scenarios against it:
//! lookup by id, by title, under a custom name, with factory defaults, through a fetch
//! function, and the two not-found policies. Each outcome is rendered the way a JSON
//! responder would: the attached object, `{}` for an empty attachment, or an error status.

use params_loader::error::{status_of, BoxError};
use params_loader::loader::{LoaderOptions, ParamHandler, ParamLoaderFactory};
use params_loader::request::Request;
use params_loader::runtime::setup_tracing;
use params_loader::store::{CollectionActor, Document};
use serde::Serialize;
use tracing::{info, warn, Instrument};

#[derive(Clone, Debug, PartialEq, Serialize)]
struct Book {
    _id: u32,
    title: String,
}

impl Document for Book {
    const MODEL_NAME: &'static str = "Book";
}

/// Runs one loader against a fresh request and renders the response.
async fn serve(
    handler: &ParamHandler<Request, Book>,
    path: &str,
    param: &str,
    value: &str,
) -> (u16, String) {
    let mut req = Request::new("GET", path).with_param(param, value);
    let mut outcome: Option<Option<BoxError>> = None;
    handler
        .handle(&mut req, |err: Option<BoxError>| outcome = Some(err), value, param)
        .await;

    match outcome {
        Some(None) => {
            let body = req
                .get::<Book>(handler.object_name())
                .map(|book| serde_json::to_string(book).unwrap_or_default())
                .unwrap_or_else(|| "{}".to_string());
            (200, body)
        }
        Some(Some(err)) => (status_of(&err).unwrap_or(500), err.to_string()),
        None => (500, "continuation not called".to_string()),
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    setup_tracing();

    info!("Starting params loader demo");

    let (actor, books) = CollectionActor::<Book>::new(32);
    let actor_handle = tokio::spawn(actor.run());

    books
        .insert(Book {
            _id: 1,
            title: "The Lord of the Rings".to_string(),
        })
        .await?;

    let factory = ParamLoaderFactory::<Request>::new();
    let popular = ParamLoaderFactory::<Request>::with_defaults(
        LoaderOptions::new().object_name("loadedObject"),
    );

    let routes: Vec<(&str, ParamHandler<Request, Book>, &str, &str)> = vec![
        (
            "/books/:id",
            factory.load_model(books.clone(), LoaderOptions::new())?,
            "id",
            "1",
        ),
        (
            "/books/by-title/:title",
            factory.load_model(books.clone(), LoaderOptions::new().field_name("title"))?,
            "title",
            "The Lord of the Rings",
        ),
        (
            "/books/bestsellers/:bestsellerId",
            factory.load_model(books.clone(), LoaderOptions::new().object_name("bestseller"))?,
            "bestsellerId",
            "1",
        ),
        (
            "/books/popular/:popularBookId",
            popular.load_model(books.clone(), LoaderOptions::new())?,
            "popularBookId",
            "1",
        ),
        (
            "/books/:id (missing)",
            factory.load_model(books.clone(), LoaderOptions::new())?,
            "id",
            "2",
        ),
        (
            "/books/bestsellers/:bestsellerId (missing, no error)",
            factory.load_model(
                books.clone(),
                LoaderOptions::new()
                    .object_name("bestseller")
                    .pass_error_to_next(false),
            )?,
            "bestsellerId",
            "2",
        ),
    ];

    let lookup = books.clone();
    let by_fetch = factory.load_with(
        move |_req: &Request, id: String| {
            let lookup = lookup.clone();
            async move { lookup.find_by("_id", id).await.map_err(BoxError::from) }
        },
        LoaderOptions::new(),
    )?;

    for (route, handler, param, value) in routes
        .iter()
        .map(|(r, h, p, v)| (*r, h, *p, *v))
        .chain(std::iter::once(("/objects/:id", &by_fetch, "id", "1")))
    {
        let span = tracing::info_span!("request", route);
        let (status, body) = serve(handler, route, param, value).instrument(span).await;
        if status == 200 {
            info!(route, object_name = handler.object_name(), status, %body, "Served");
        } else {
            warn!(route, status, %body, "Failed");
        }
    }

    drop(routes);
    drop(by_fetch);
    drop(books);
    actor_handle.await?;

    info!("Demo completed");
    Ok(())
}
