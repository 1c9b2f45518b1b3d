use crate::auth::SessionContext;
use crate::cms::{ArticleView, AuthorView, BlogFilter, Block, CATEGORIES};
use crate::templates::desktop_layout;
use maud::{html, Markup};

fn article_meta(a: &ArticleView) -> Markup {
    html! {
        div class="article-meta" {
            span class="badge" { (a.category) }
            @if !a.date.is_empty() { span { (a.date) } }
            span { (a.read_time) }
            span { "By " (a.author) }
        }
    }
}

fn article_card(a: &ArticleView) -> Markup {
    html! {
        article class="post-card" {
            @if let Some(src) = &a.image {
                img src=(src) alt=(a.title) loading="lazy";
            }
            (article_meta(a))
            h3 { a href=(format!("/blog/{}", a.slug)) { (a.title) } }
            p class="excerpt" { (a.excerpt) }
        }
    }
}

fn category_href(category: &str, query: Option<&str>) -> String {
    let mut qs = url::form_urlencoded::Serializer::new(String::new());
    qs.append_pair("category", category);
    if let Some(q) = query.filter(|q| !q.trim().is_empty()) {
        qs.append_pair("q", q);
    }
    format!("/blog?{}", qs.finish())
}

pub fn blog_page(
    session: Option<&SessionContext>,
    featured: Option<&ArticleView>,
    posts: &[ArticleView],
    filter: &BlogFilter,
) -> Markup {
    let selected = filter.selected_category();
    desktop_layout(
        "Blog",
        session,
        html! {
            main class="container" {
                h1 { "Trade Pilot blog" }

                @if let Some(post) = featured {
                    section class="featured-post" {
                        @if let Some(src) = &post.image {
                            img src=(src) alt=(post.title);
                        }
                        (article_meta(post))
                        h2 { (post.title) }
                        p { (post.excerpt) }
                        a class="button" href=(format!("/blog/{}", post.slug)) { "Read article" }
                    }
                }

                form class="blog-search" method="get" action="/blog" {
                    input type="hidden" name="category" value=(selected);
                    input type="search" name="q" placeholder="Search articles" value=[filter.query.as_deref()];
                    button type="submit" { "Search" }
                }

                nav class="category-tabs" {
                    @for category in CATEGORIES {
                        a
                            href=(category_href(category, filter.query.as_deref()))
                            class=(if *category == selected { "tab active" } else { "tab" })
                        { (category) }
                    }
                }

                @if posts.is_empty() {
                    p class="muted" { "No articles found." }
                } @else {
                    div class="post-grid" {
                        @for post in posts {
                            (article_card(post))
                        }
                    }
                }
            }
        },
    )
}

fn paragraphs(body: &str) -> Markup {
    html! {
        @for para in body.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
            @if let Some(heading) = para.strip_prefix('#') {
                h2 { (heading.trim_start_matches('#').trim()) }
            } @else {
                p { (para) }
            }
        }
    }
}

fn render_block(block: &Block) -> Markup {
    html! {
        @match block {
            Block::RichText { body } => div class="rich-text" { (paragraphs(body)) },
            Block::Quote { title, body } => blockquote {
                @if let Some(t) = title { strong { (t) } }
                p { (body) }
            },
            Block::Media(media) => figure {
                img src=(media.url) alt=(media.alt);
                @if let Some(caption) = &media.caption { figcaption { (caption) } }
            },
            Block::Slider(images) => div class="gallery" {
                @for image in images {
                    figure {
                        img src=(image.url) alt=(image.alt) loading="lazy";
                        @if let Some(caption) = &image.caption { figcaption { (caption) } }
                    }
                }
            },
        }
    }
}

pub fn blog_post_page(
    session: Option<&SessionContext>,
    article: &ArticleView,
    author: Option<&AuthorView>,
) -> Markup {
    desktop_layout(
        &article.title,
        session,
        html! {
            main class="container narrow" {
                p { a href="/blog" { "← Back to blog" } }
                (article_meta(article))
                h1 { (article.title) }
                @if let Some(src) = &article.image {
                    img class="cover" src=(src) alt=(article.title);
                }
                @if article.blocks.is_empty() {
                    p class="lead" { (article.excerpt) }
                }
                @for block in &article.blocks {
                    (render_block(block))
                }

                @if let Some(author) = author {
                    aside class="author-bio" {
                        @if let Some(avatar) = &author.avatar {
                            img src=(avatar) alt=(author.name) width="50" height="50";
                        }
                        strong { (author.name) }
                        @if let Some(bio) = &author.bio { p { (bio) } }
                    }
                }
            }
        },
    )
}
