use crate::models::PostModel;
use crate::utils::render_markdown;
use ammonia::clean_text;
use std::fmt::Write;

const TOPICS: [&str; 4] = ["Lectures", "Projects", "Homework", "General"];

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 860px; margin: 2rem auto; padding: 0 1rem; color: #222; }
header { display: flex; justify-content: space-between; align-items: center; gap: 1rem; flex-wrap: wrap; }
form.ask { display: grid; gap: .5rem; margin: 1.5rem 0; padding: 1rem; border: 1px solid #ddd; border-radius: 8px; }
article { border: 1px solid #ddd; border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }
article.pinned { border-color: #c9a227; background: #fffbea; }
article.resolved h2 { text-decoration: line-through; color: #666; }
.question { white-space: pre-wrap; }
.meta { font-size: .85rem; color: #666; }
.badge { font-size: .75rem; padding: .1rem .4rem; border-radius: 4px; background: #eee; margin-right: .3rem; }
.answer { border-left: 3px solid #4a7; padding-left: .8rem; margin-top: .8rem; }
.actions button { margin-right: .3rem; }
pre { background: #f5f5f5; padding: .6rem; overflow-x: auto; }
"#;

const SCRIPT: &str = r#"
async function postAction(url) {
  const resp = await fetch(url, { method: 'POST' });
  const data = await resp.json();
  if (!resp.ok) { alert(data.error || 'Request failed'); return null; }
  return data;
}
document.addEventListener('click', async (ev) => {
  const btn = ev.target.closest('button[data-action]');
  if (!btn) return;
  const article = btn.closest('article');
  const id = article.dataset.id;
  const action = btn.dataset.action;
  if (action === 'up' || action === 'down') {
    const data = await postAction(`/vote/${action}/${id}`);
    if (data) {
      article.querySelector('.upvotes').textContent = data.upvotes;
      article.querySelector('.downvotes').textContent = data.downvotes;
    }
  } else if (action === 'pin' || action === 'resolve') {
    if (await postAction(`/${action}/${id}`)) location.reload();
  } else if (action === 'delete') {
    if (!confirm('Delete this post?')) return;
    if (await postAction(`/delete/${id}`)) article.remove();
  }
});
"#;

/// Render the board page: the ask form, the search box and the given posts
/// in the order supplied.
pub fn render_board(posts: &[PostModel], search_query: Option<&str>) -> String {
    let mut html = String::with_capacity(4096 + posts.len() * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Class Discussion Board</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");

    render_header(&mut html, search_query);
    render_ask_form(&mut html);

    html.push_str("<main id=\"posts\">\n");
    if posts.is_empty() {
        match search_query {
            Some(q) => {
                let _ = writeln!(
                    html,
                    "<p class=\"empty\">No posts match &quot;{}&quot;.</p>",
                    clean_text(q)
                );
            }
            None => html.push_str("<p class=\"empty\">No questions yet. Be the first to ask!</p>\n"),
        }
    }
    for post in posts {
        render_post(&mut html, post);
    }
    html.push_str("</main>\n<script>");
    html.push_str(SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");

    html
}

fn render_header(html: &mut String, search_query: Option<&str>) {
    html.push_str("<header>\n<h1><a href=\"/\">Class Discussion Board</a></h1>\n");
    let _ = writeln!(
        html,
        "<form class=\"search\" action=\"/search\" method=\"get\">\
         <input type=\"search\" name=\"query\" placeholder=\"Search questions\" value=\"{}\">\
         <button type=\"submit\">Search</button></form>",
        clean_text(search_query.unwrap_or_default())
    );
    html.push_str("</header>\n");
}

fn render_ask_form(html: &mut String) {
    html.push_str(
        "<form class=\"ask\" action=\"/add_post\" method=\"post\">\n\
         <input name=\"title\" placeholder=\"Question title\" required>\n\
         <input name=\"topic\" list=\"topics\" placeholder=\"Topic\" required>\n<datalist id=\"topics\">",
    );
    for topic in TOPICS {
        let _ = write!(html, "<option value=\"{topic}\">");
    }
    html.push_str(
        "</datalist>\n\
         <textarea name=\"question_body\" rows=\"5\" placeholder=\"Describe your question or paste your error\" required></textarea>\n\
         <button type=\"submit\">Ask</button>\n</form>\n",
    );
}

fn render_post(html: &mut String, post: &PostModel) {
    let mut classes = String::from("post");
    if post.is_pinned {
        classes.push_str(" pinned");
    }
    if post.is_resolved {
        classes.push_str(" resolved");
    }

    let _ = writeln!(html, "<article class=\"{}\" data-id=\"{}\">", classes, post.id);

    html.push_str("<div class=\"meta\">");
    if post.is_pinned {
        html.push_str("<span class=\"badge pinned-badge\">Pinned</span>");
    }
    if post.is_resolved {
        html.push_str("<span class=\"badge resolved-badge\">Resolved</span>");
    }
    let _ = writeln!(
        html,
        "<span class=\"badge topic\">{}</span><time>{}</time></div>",
        clean_text(&post.topic),
        post.created_at.format("%Y-%m-%d %H:%M")
    );

    let _ = writeln!(html, "<h2>{}</h2>", clean_text(&post.title));
    let _ = writeln!(
        html,
        "<div class=\"question\">{}</div>",
        clean_text(&post.question_body)
    );

    if let Some(answer) = post.ai_response.as_deref() {
        let _ = writeln!(
            html,
            "<section class=\"answer\"><h3>AI Assistant</h3>{}</section>",
            render_markdown(answer)
        );
    }

    let _ = writeln!(
        html,
        "<div class=\"actions\">\
         <button data-action=\"up\">&#9650; <span class=\"upvotes\">{}</span></button>\
         <button data-action=\"down\">&#9660; <span class=\"downvotes\">{}</span></button>\
         <button data-action=\"pin\">{}</button>\
         <button data-action=\"resolve\">{}</button>\
         <button data-action=\"delete\">Delete</button></div>",
        post.upvotes,
        post.downvotes,
        if post.is_pinned { "Unpin" } else { "Pin" },
        if post.is_resolved { "Reopen" } else { "Mark resolved" },
    );
    html.push_str("</article>\n");
}
