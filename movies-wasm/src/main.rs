use dioxus::logger::tracing::info;
use dioxus::prelude::*;
use movies_client::render::{LOAD_FAILED_MESSAGE, NO_MOVIES_MESSAGE};
use movies_client::{Catalog, CatalogError, CatalogSession, Movie, MovieForm, MovieId, filter_movies};

use crate::client::MoviesClientGloo;

mod client;

const API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Copy, PartialEq)]
enum LoadState {
    Loading,
    Ready,
    Failed,
}

type Editing = Option<(MovieId, MovieForm)>;

fn main() {
    dioxus::launch(App);
}

fn session_for(movies: Signal<Vec<Movie>>) -> CatalogSession<MoviesClientGloo> {
    CatalogSession::with_catalog(
        MoviesClientGloo::new(API_URL),
        Catalog::from_movies(movies.read().clone()),
    )
}

/// Publishes whatever snapshot the session ended with: the reloaded list
/// after a success, the untouched one after a failure. A change that was
/// accepted and reloaded also clears an earlier load failure.
fn finish(
    session: CatalogSession<MoviesClientGloo>,
    accepted: bool,
    mut movies: Signal<Vec<Movie>>,
    mut load_state: Signal<LoadState>,
) {
    if accepted && !session.is_stale() {
        load_state.set(LoadState::Ready);
    }
    movies.set(session.into_catalog().into_movies());
}

/// Validation and lookup problems go to the user; transport failures were
/// already logged by the session.
fn report(mut notice: Signal<Option<String>>, err: &CatalogError) {
    match err {
        CatalogError::Validation(_) | CatalogError::NotFound(_) => notice.set(Some(err.to_string())),
        CatalogError::Client(_) => {}
    }
}

async fn reload(mut movies: Signal<Vec<Movie>>, mut load_state: Signal<LoadState>) {
    let mut session = CatalogSession::new(MoviesClientGloo::new(API_URL));
    match session.load().await {
        Ok(catalog) => {
            movies.set(catalog.movies().to_vec());
            load_state.set(LoadState::Ready);
        }
        Err(_) => load_state.set(LoadState::Failed),
    }
}

fn begin_edit(
    movies: Signal<Vec<Movie>>,
    mut editing: Signal<Editing>,
    notice: Signal<Option<String>>,
    id: MovieId,
) {
    let seeded = movies
        .read()
        .iter()
        .find(|m| m.id == id)
        .map(MovieForm::from_movie);
    match seeded {
        Some(form) => editing.set(Some((id, form))),
        None => report(notice, &CatalogError::NotFound(id)),
    }
}

fn confirm_delete(
    movies: Signal<Vec<Movie>>,
    load_state: Signal<LoadState>,
    mut pending: Signal<Option<MovieId>>,
    id: MovieId,
) {
    pending.set(None);
    spawn(async move {
        let mut session = session_for(movies);
        let accepted = session.delete(&id, || true).await.is_ok();
        if accepted {
            info!(id = %id, "movie deleted");
        }
        finish(session, accepted, movies, load_state);
    });
}

#[component]
fn App() -> Element {
    let movies = use_signal(Vec::<Movie>::new);
    let load_state = use_signal(|| LoadState::Loading);
    let mut query = use_signal(String::new);
    let editing = use_signal(|| None::<(MovieId, MovieForm)>);
    let mut pending_delete = use_signal(|| None::<MovieId>);
    let mut notice = use_signal(|| None::<String>);

    use_future(move || async move {
        reload(movies, load_state).await;
    });

    let visible: Vec<Movie> = filter_movies(&movies.read(), &query.read())
        .into_iter()
        .cloned()
        .collect();
    let state = *load_state.read();

    rsx! {
        div { class: "max-w-3xl mx-auto px-6 py-10",
            h1 { class: "text-4xl font-bold mb-8 text-center", "Movie Catalog" }

            if let Some(message) = notice.read().clone() {
                div { class: "mb-6 rounded-xl bg-yellow-100 text-yellow-900 px-5 py-3 flex justify-between", role: "alert",
                    span { "{message}" }
                    button { onclick: move |_| notice.set(None), "Dismiss" }
                }
            }

            input {
                id: "search-input",
                r#type: "search",
                placeholder: "Search by title or genre...",
                value: "{query}",
                oninput: move |evt| query.set(evt.value()),
                class: "w-full px-5 py-3 mb-6 border border-gray-300 rounded-xl text-black"
            }

            AddMovieForm { movies, load_state, notice }

            if let Some(id) = pending_delete.read().clone() {
                div { class: "my-4 rounded-xl bg-red-50 px-5 py-3 flex gap-4 items-center", role: "alertdialog",
                    span { class: "text-red-700", "Delete this movie?" }
                    button {
                        class: "px-4 py-2 bg-red-600 text-white rounded-lg",
                        onclick: move |_| confirm_delete(movies, load_state, pending_delete, id.clone()),
                        "Delete"
                    }
                    button {
                        class: "px-4 py-2 border rounded-lg",
                        onclick: move |_| pending_delete.set(None),
                        "Cancel"
                    }
                }
            }

            div { id: "movie-list", class: "space-y-4",
                match state {
                    LoadState::Loading => rsx! { p { class: "text-gray-500", "Loading movies..." } },
                    LoadState::Failed => rsx! { p { style: "color:red", "{LOAD_FAILED_MESSAGE}" } },
                    LoadState::Ready if visible.is_empty() => rsx! { p { "{NO_MOVIES_MESSAGE}" } },
                    LoadState::Ready => rsx! {
                        for movie in visible {
                            MovieItem {
                                key: "{movie.id}",
                                movie: movie.clone(),
                                movies,
                                editing,
                                pending_delete,
                                notice,
                            }
                        }
                    },
                }
            }

            if let Some((id, form)) = editing.read().clone() {
                EditDialog {
                    key: "{id}",
                    id: id.clone(),
                    initial: form,
                    movies,
                    load_state,
                    editing,
                    notice,
                }
            }
        }
    }
}

#[component]
fn MovieItem(
    movie: Movie,
    movies: Signal<Vec<Movie>>,
    editing: Signal<Editing>,
    pending_delete: Signal<Option<MovieId>>,
    notice: Signal<Option<String>>,
) -> Element {
    let mut pending_delete = pending_delete;
    let edit_id = movie.id.clone();
    let delete_id = movie.id.clone();

    rsx! {
        div { class: "movie-item flex justify-between items-center bg-white rounded-xl shadow px-5 py-4", "data-id": "{movie.id}",
            p { class: "text-gray-900",
                strong { "{movie.title}" }
                " ({movie.year}) - {movie.genre}"
            }
            div { class: "movie-actions flex gap-2",
                button {
                    class: "edit-btn px-4 py-2 bg-indigo-600 text-white rounded-lg",
                    onclick: move |_| begin_edit(movies, editing, notice, edit_id.clone()),
                    "Edit"
                }
                button {
                    class: "delete-btn px-4 py-2 bg-red-600 text-white rounded-lg",
                    onclick: move |_| pending_delete.set(Some(delete_id.clone())),
                    "Delete"
                }
            }
        }
    }
}

#[component]
fn AddMovieForm(
    movies: Signal<Vec<Movie>>,
    load_state: Signal<LoadState>,
    notice: Signal<Option<String>>,
) -> Element {
    let mut title = use_signal(String::new);
    let mut year = use_signal(String::new);
    let mut genre = use_signal(String::new);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let form = MovieForm::new(title.read().clone(), year.read().clone(), genre.read().clone());
        spawn(async move {
            let mut session = session_for(movies);
            let result = session.create(&form).await;
            finish(session, result.is_ok(), movies, load_state);
            match result {
                Ok(movie) => {
                    info!(id = %movie.id, "movie added");
                    title.set(String::new());
                    year.set(String::new());
                    genre.set(String::new());
                }
                Err(err) => report(notice, &err),
            }
        });
    };

    rsx! {
        form { id: "add-movie-form", class: "grid grid-cols-4 gap-3 mb-8", onsubmit: on_submit,
            input {
                id: "title",
                placeholder: "Title",
                value: "{title}",
                oninput: move |evt| title.set(evt.value()),
                class: "px-4 py-3 border rounded-xl text-black"
            }
            input {
                id: "year",
                r#type: "number",
                placeholder: "Year",
                value: "{year}",
                oninput: move |evt| year.set(evt.value()),
                class: "px-4 py-3 border rounded-xl text-black"
            }
            input {
                id: "genre",
                placeholder: "Genre",
                value: "{genre}",
                oninput: move |evt| genre.set(evt.value()),
                class: "px-4 py-3 border rounded-xl text-black"
            }
            button { r#type: "submit", class: "bg-indigo-600 text-white rounded-xl", "Add Movie" }
        }
    }
}

/// One form for all three fields; nothing is sent until Save, and Cancel
/// drops the edit entirely.
#[component]
fn EditDialog(
    id: MovieId,
    initial: MovieForm,
    movies: Signal<Vec<Movie>>,
    load_state: Signal<LoadState>,
    editing: Signal<Editing>,
    notice: Signal<Option<String>>,
) -> Element {
    let mut editing = editing;
    let mut title = use_signal(|| initial.title.clone());
    let mut year = use_signal(|| initial.year.clone());
    let mut genre = use_signal(|| initial.genre.clone());

    let on_save = move |evt: FormEvent| {
        evt.prevent_default();
        let form = MovieForm::new(title.read().clone(), year.read().clone(), genre.read().clone());
        let id = id.clone();
        spawn(async move {
            let mut session = session_for(movies);
            let result = session.edit(&id, &form).await;
            finish(session, result.is_ok(), movies, load_state);
            match result {
                Ok(movie) => {
                    info!(id = %movie.id, "movie updated");
                    editing.set(None);
                }
                Err(err) => report(notice, &err),
            }
        });
    };

    rsx! {
        div { class: "fixed inset-0 bg-black/40 flex items-center justify-center", role: "dialog",
            form { class: "bg-white rounded-2xl shadow-xl p-8 w-full max-w-md space-y-4", onsubmit: on_save,
                h2 { class: "text-2xl font-bold text-gray-900", "Edit Movie" }
                input {
                    value: "{title}",
                    oninput: move |evt| title.set(evt.value()),
                    class: "w-full px-4 py-3 border rounded-xl text-black"
                }
                input {
                    r#type: "number",
                    value: "{year}",
                    oninput: move |evt| year.set(evt.value()),
                    class: "w-full px-4 py-3 border rounded-xl text-black"
                }
                input {
                    value: "{genre}",
                    oninput: move |evt| genre.set(evt.value()),
                    class: "w-full px-4 py-3 border rounded-xl text-black"
                }
                div { class: "flex justify-end gap-3",
                    button {
                        r#type: "button",
                        class: "px-6 py-3 border rounded-xl",
                        onclick: move |_| editing.set(None),
                        "Cancel"
                    }
                    button { r#type: "submit", class: "px-6 py-3 bg-indigo-600 text-white rounded-xl", "Save Changes" }
                }
            }
        }
    }
}
