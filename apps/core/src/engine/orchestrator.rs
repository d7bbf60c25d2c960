//! Response orchestration.
//!
//! One priority cascade per incoming message: gate-prediction redirect,
//! expedition lookup, educational content, sighting-info redirect, then the
//! generative fallback. The first branch that fires wins; every branch ends
//! in the same finalization step, which appends the turn and writes history
//! through the cache. Informational URLs always come from configuration,
//! never from the model.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::brain::{taxonomy, IntentClassifier, IntentSignals};
use crate::config::AppConfig;
use crate::engine::generator::{
    clip, package_description, select_best_package, DescriptionKind,
};
use crate::engine::history::SessionHistory;
use crate::engine::traits::{
    ArticleStore, HistoryCache, PackageStore, SessionStore, TextGenerator,
};
use crate::error::{AppError, Result};
use crate::models::{
    BotReply, ChatMessage, ExpeditionCard, FeaturedArticle, PackageDetails, PackageSuggestion,
};
use crate::resolvers::{construct_package_url, ContentMatch, ContentResolver, ExpeditionResolver};

pub struct ChatEngine {
    config: AppConfig,
    intents: IntentClassifier,
    content: ContentResolver,
    expeditions: ExpeditionResolver,
    history: SessionHistory,
    packages: Arc<dyn PackageStore>,
    generator: Arc<dyn TextGenerator>,
}

impl ChatEngine {
    pub fn new(
        config: AppConfig,
        sessions: Arc<dyn SessionStore>,
        articles: Arc<dyn ArticleStore>,
        packages: Arc<dyn PackageStore>,
        cache: Arc<dyn HistoryCache>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let content = ContentResolver::new(
            articles,
            &config.content_site_base_url,
            config.max_content_results,
        );
        let expeditions = ExpeditionResolver::new(packages.clone());
        let history = SessionHistory::new(
            sessions,
            cache,
            &config.history_cache_key_prefix,
            config.history_limit,
            Duration::from_secs(config.history_cache_ttl_secs),
        );

        Self {
            config,
            intents: IntentClassifier::new(),
            content,
            expeditions,
            history,
            packages,
            generator,
        }
    }

    /// Answers one user message for a session and persists the exchange.
    #[instrument(skip(self, message))]
    pub async fn respond(&self, session_id: &str, message: &str) -> Result<BotReply> {
        let history = self.history.get(session_id).await?;
        let signals = self.intents.classify(message);
        info!(?signals, "message classified");

        let reply = if signals.gate_prediction {
            self.gate_prediction_reply(message).await
        } else if signals.expedition {
            self.expedition_reply(message).await
        } else {
            let content = self.content.match_message(message).await;
            if content.matched && !content.posts.is_empty() {
                self.content_reply(&content)
            } else if signals.predictive_info {
                self.sighting_info_reply()
            } else {
                self.generative_reply(&signals, &history, message).await?
            }
        };

        self.finalize(session_id, history, message, reply).await
    }

    /// The most recent turns for a session, via the cache path.
    pub async fn session_history(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        self.history.get(session_id).await
    }

    /// Full detail payload for one package, with a freshly derived
    /// description. The description is never persisted.
    pub async fn package_details(&self, package_id: &str) -> Result<PackageDetails> {
        let package = self
            .packages
            .package_by_id(package_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("package {} not found", package_id)))?;

        let description = package_description(
            self.generator.as_ref(),
            &package,
            DescriptionKind::Detailed,
            self.config.short_description_limit,
        )
        .await;

        Ok(PackageDetails {
            title: package.title,
            image: package.image,
            additional_images: package.additional_images,
            description,
            duration: package.duration,
            region: package.region,
            price: package.price,
            currency: package.currency,
            kind: package.kind,
            features: package.features,
            package_id: package.id,
        })
    }

    /// Single point of truth for "append turn and persist": every cascade
    /// branch funnels through here.
    async fn finalize(
        &self,
        session_id: &str,
        mut history: Vec<ChatMessage>,
        user_message: &str,
        reply: BotReply,
    ) -> Result<BotReply> {
        history.push(ChatMessage::user(user_message));
        history.push(ChatMessage::bot(reply.reply.clone()));
        self.history.put(session_id, history).await?;
        Ok(reply)
    }

    async fn gate_prediction_reply(&self, message: &str) -> BotReply {
        let park = first_location_mention(message);

        let mut reply = String::from("🎯 **AI-Powered Gate Prediction**\n\n");
        reply.push_str(
            "We use an AI predictive model to help you pick the best safari gate for wildlife \
             sightings. It weighs historical sighting data, seasonal patterns, and current \
             conditions based on:\n\n",
        );
        reply.push_str(
            "✅ The national park you are visiting\n✅ Your safari date\n\
             ✅ Seasonal wildlife movement\n✅ Recent sighting trends\n\n",
        );
        reply.push_str(&format!(
            "📊 **Get AI-powered gate recommendations:** {}\n\n",
            self.config.gate_prediction_url
        ));

        if let Some(park) = park {
            reply.push_str(&format!(
                "Planning a safari to {}? Check out our expedition packages:\n",
                park
            ));
            let result = self.expeditions.match_query(&park).await;
            if let Some(package) = result.packages.first().filter(|_| result.matched) {
                let url = construct_package_url(package, &self.config.expedition_site_base_url);
                reply.push_str(&format!("🌿 {}\n\n", url));
            }
        } else {
            reply.push_str(
                "💡 *Tip: open the link above and pick your destination park and travel dates \
                 for personalised gate recommendations.*\n\n",
            );
        }

        reply.push_str("Let the model tip the odds of a great sighting in your favour. 🐅🌿");
        BotReply::text(reply)
    }

    async fn expedition_reply(&self, message: &str) -> BotReply {
        let result = self.expeditions.match_query(message).await;

        if result.matched && !result.packages.is_empty() {
            let park_name = result.park_name.clone().unwrap_or_default();
            let top = &result.packages[0];

            let mut reply = match first_month_mention(message) {
                Some(month) => format!(
                    "Yes! We have expeditions planned for {} to {}. 🌿\n\n",
                    month, park_name
                ),
                None => format!("Yes! We have exciting expeditions to {}. 🌿\n\n", park_name),
            };

            let title = if top.title.is_empty() {
                top.heading.clone()
            } else {
                top.title.clone()
            };
            let url = construct_package_url(top, &self.config.expedition_site_base_url);

            reply.push_str(&format!("**{}**\n", title));
            if !top.duration.is_empty() {
                reply.push_str(&format!("📅 Duration: {}\n", top.duration));
            }
            if !top.description.is_empty() {
                let short = clip(&top.description, 150);
                if short.len() < top.description.len() {
                    reply.push_str(&format!("\n{}...\n", short));
                } else {
                    reply.push_str(&format!("\n{}\n", short));
                }
            }
            reply.push_str(&format!("\n🔗 **View detailed itinerary and book:** {}\n", url));

            if result.packages.len() > 1 {
                reply.push_str(&format!("\n**Other {} expeditions:**\n", park_name));
                for package in result.packages.iter().skip(1).take(2) {
                    let other_title = if package.title.is_empty() {
                        package.heading.clone()
                    } else {
                        package.title.clone()
                    };
                    let other_url =
                        construct_package_url(package, &self.config.expedition_site_base_url);
                    reply.push_str(&format!("• {}: {}\n", other_title, other_url));
                }
            }
            reply.push_str(
                "\n💡 *Every expedition includes expert guides, comfortable accommodation, and \
                 curated wildlife experiences!*",
            );

            return BotReply {
                reply,
                banner_image: (!top.image.is_empty()).then(|| top.image.clone()),
                expedition_package: Some(ExpeditionCard {
                    title,
                    image: top.image.clone(),
                    duration: top.duration.clone(),
                    description: clip(&top.description, 200).to_string(),
                    url,
                    park: park_name,
                }),
                ..Default::default()
            };
        }

        if let Some(park_name) = result.park_name {
            // A park was recognized but no packages came back for it.
            return BotReply::text(format!(
                "We don't currently have expeditions for {}. Would you like to explore other \
                 parks?",
                park_name
            ));
        }

        if !result.available_parks.is_empty() {
            let parks: Vec<&str> = result
                .available_parks
                .iter()
                .take(10)
                .map(String::as_str)
                .collect();
            return BotReply::text(format!(
                "Yes! We offer jungle safari expeditions in: {}. Which one are you interested \
                 in?",
                parks.join(", ")
            ));
        }

        BotReply::text("We're currently setting up our expedition packages. Please check back soon!")
    }

    fn content_reply(&self, content: &ContentMatch) -> BotReply {
        let posts = &content.posts;
        let top = &posts[0];

        let mut reply = String::from("I found some great resources on this topic:\n\n");
        let mut featured_image = None;
        let mut featured_article = None;

        if !top.article.image.is_empty() {
            reply.push_str(&format!("**Featured:** {}\n", top.article.title));
            if !top.article.excerpt.is_empty() {
                reply.push_str(&format!("{}...\n\n", clip(&top.article.excerpt, 150)));
            }
            reply.push_str(&format!("🔗 Read more: {}\n\n", top.url));

            if posts.len() > 1 {
                reply.push_str("**More articles:**\n");
                for post in posts.iter().skip(1).take(4) {
                    reply.push_str(&format!("📖 {}: {}\n", post.article.title, post.url));
                }
            }

            featured_image = Some(top.article.image.clone());
            featured_article = Some(FeaturedArticle {
                title: top.article.title.clone(),
                excerpt: clip(&top.article.excerpt, 200).to_string(),
                url: top.url.clone(),
                image: top.article.image.clone(),
            });
        } else {
            for post in posts.iter().take(5) {
                reply.push_str(&format!("📖 **{}**\n", post.article.title));
                if !post.article.excerpt.is_empty() {
                    reply.push_str(&format!("   {}...\n", clip(&post.article.excerpt, 100)));
                }
                reply.push_str(&format!("   Read more: {}\n\n", post.url));
            }
        }

        reply.push_str(&format!(
            "Explore more educational content at {} 🌿",
            self.config.content_site_base_url
        ));

        BotReply {
            reply,
            featured_image,
            featured_article,
            ..Default::default()
        }
    }

    fn sighting_info_reply(&self) -> BotReply {
        BotReply::text(format!(
            "For information on sighting probabilities and AI-based predictions, visit: {}\n\n\
             This page provides detailed insights into wildlife sighting predictions powered by \
             AI technology.",
            self.config.sighting_info_url
        ))
    }

    async fn generative_reply(
        &self,
        signals: &IntentSignals,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<BotReply> {
        let text = self
            .generator
            .complete(&self.config.system_prompt, history, message)
            .await?;

        let mut reply = BotReply::text(text);
        if signals.travel {
            reply.package_suggestion = self.suggest_package(message).await;
        }
        Ok(reply)
    }

    /// One AI-assisted best-match over the active packages, with a generated
    /// short description. Any failure along the way drops the suggestion
    /// rather than the reply.
    async fn suggest_package(&self, message: &str) -> Option<PackageSuggestion> {
        let packages = match self
            .packages
            .active_packages(self.config.max_packages_to_search)
            .await
        {
            Ok(packages) => packages,
            Err(e) => {
                warn!(error = %e, "package store unavailable for suggestions");
                return None;
            }
        };

        let best = select_best_package(self.generator.as_ref(), message, &packages).await?;
        let description = package_description(
            self.generator.as_ref(),
            best,
            DescriptionKind::Short,
            self.config.short_description_limit,
        )
        .await;

        Some(PackageSuggestion {
            title: best.title.clone(),
            image: best.image.clone(),
            description,
            package_id: best.id.clone(),
        })
    }
}

/// First gazetteer location contained in the message, title-cased for display.
fn first_location_mention(message: &str) -> Option<String> {
    let text = message.to_lowercase();
    taxonomy::LOCATION_KEYWORDS
        .iter()
        .find(|location| text.contains(*location))
        .map(|location| title_case(location))
}

/// First month name contained in the message, title-cased for display.
fn first_month_mention(message: &str) -> Option<String> {
    let text = message.to_lowercase();
    taxonomy::MONTHS
        .iter()
        .find(|month| text.contains(*month))
        .map(|month| title_case(month))
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
