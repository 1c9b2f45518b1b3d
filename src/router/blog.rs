use astra::Request;

use super::request::{parse_query, path_text};
use crate::auth::SessionContext;
use crate::cms::{featured, BlogFilter};
use crate::errors::ServerError;
use crate::responses::{html_response, ResultResp};
use crate::state::AppState;
use crate::templates::pages::{blog_page, blog_post_page};

pub fn index(req: &Request, state: &AppState, session: Option<&SessionContext>) -> ResultResp {
    let mut query = parse_query(req);
    let filter = BlogFilter {
        category: query.remove("category"),
        query: query.remove("q"),
    };
    let articles = state.blog.articles();
    let posts = filter.apply(&articles);
    html_response(blog_page(session, featured(&articles), &posts, &filter))
}

pub fn show(state: &AppState, session: Option<&SessionContext>, slug: &str) -> ResultResp {
    let slug = path_text(slug)?;
    let article = state.blog.article(&slug).ok_or(ServerError::NotFound)?;
    let author = state.blog.author(&article.author);
    html_response(blog_post_page(session, &article, author.as_ref()))
}
