use crate::error::AppResult;
use crate::services::post::PostService;

struct SamplePost {
    title: &'static str,
    question_body: &'static str,
    ai_response: &'static str,
    topic: &'static str,
}

const SAMPLE_POSTS: [SamplePost; 2] = [
    SamplePost {
        title: "How to filter a data frame in R?",
        question_body: "I have a data frame called `df` with a column `age`. I want to keep only the rows where age is greater than 30. How do I do this using dplyr?",
        ai_response: "Great question! The best way to filter in `dplyr` is using the `filter()` function. You can use the pipe operator `%>%` to make your code more readable. Here is the corrected code:\n\n```r\nlibrary(dplyr)\n\n# Assuming your data frame is named df\nfiltered_df <- df %>% \n  filter(age > 30)\n\nprint(filtered_df)\n```\n\nThis works because the `filter()` function takes a logical condition and returns only the rows where that condition is TRUE.",
        topic: "Lectures",
    },
    SamplePost {
        title: "ggplot error: \"Don't know how to automatically pick scale\"",
        question_body: "I am trying to make a scatter plot with ggplot but I keep getting this error. Here is my code: `ggplot(data = my_data, aes(x = weight, y = height)) + geom_point` What did I do wrong?",
        ai_response: "This is a very common error! It usually happens when you forgot to add the parentheses `()` to the `geom_point` layer. Your code should be:\n\n```r\nlibrary(ggplot2)\n\n# The key is adding () after geom_point\nggplot(data = my_data, aes(x = weight, y = height)) + \n  geom_point()\n```\n\nThe `geom_` functions in ggplot are themselves functions that return a layer object. You need to call them with `()` to add that layer to the plot.",
        topic: "Projects",
    },
];

/// Insert the example posts when the board is empty. Returns how many were
/// inserted.
pub async fn seed_sample_posts(service: &PostService) -> AppResult<usize> {
    if service.count().await? > 0 {
        tracing::debug!("Posts already present, skipping sample data");
        return Ok(0);
    }

    for sample in &SAMPLE_POSTS {
        service
            .create(
                sample.title,
                sample.question_body,
                Some(sample.ai_response),
                sample.topic,
            )
            .await?;
    }

    tracing::info!("Added {} sample posts", SAMPLE_POSTS.len());
    Ok(SAMPLE_POSTS.len())
}
