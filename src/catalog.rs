use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::{
    entities::{fold_case, genre, language, movie},
    error::{AppError, AppResult},
    models::{MovieChanges, MovieDetails, NewMovie},
};

/// Every query the HTTP layer issues against the movie catalog.
pub struct Catalog {
    db: DatabaseConnection,
}

impl Catalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_movies(&self) -> AppResult<Vec<MovieDetails>> {
        let movies =
            movie::Entity::find().order_by_asc(movie::Column::Title).all(&self.db).await?;
        self.expand(movies).await
    }

    pub async fn find_movie(&self, id: i32) -> AppResult<Option<MovieDetails>> {
        let Some(movie) = movie::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.expand(vec![movie]).await?.pop())
    }

    /// Movies whose genre name matches ignoring case, in id order.
    pub async fn movies_by_genre(&self, genre_name: &str) -> AppResult<Vec<MovieDetails>> {
        let movies = movie::Entity::find()
            .join(sea_orm::JoinType::InnerJoin, movie::Relation::Genre.def())
            .filter(genre::Column::NameKey.eq(fold_case(genre_name)))
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        self.expand(movies).await
    }

    pub async fn movie_title_taken(&self, title: &str, excluding: Option<i32>) -> AppResult<bool> {
        let mut query = movie::Entity::find().filter(movie::Column::TitleKey.eq(fold_case(title)));
        if let Some(id) = excluding {
            query = query.filter(movie::Column::Id.ne(id));
        }
        Ok(query.one(&self.db).await?.is_some())
    }

    pub async fn create_movie(&self, new: NewMovie) -> AppResult<movie::Model> {
        let title = new.title.clone();
        let model = movie::ActiveModel {
            id: Default::default(),
            title_key: Set(fold_case(&new.title)),
            title: Set(new.title),
            oscar_count: Set(new.oscar_count),
            release_date: Set(new.release_date.to_string()),
            genre_id: Set(new.genre_id),
            language_id: Set(new.language_id),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|err| AppError::from_write(err, duplicate_title(&title)))
    }

    /// Applies only the supplied fields. `None` when no movie has `id`.
    pub async fn update_movie(
        &self,
        id: i32,
        changes: MovieChanges,
    ) -> AppResult<Option<movie::Model>> {
        let Some(existing) = movie::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: movie::ActiveModel = existing.clone().into();
        if let Some(title) = changes.title.clone() {
            active.title_key = Set(fold_case(&title));
            active.title = Set(title);
        }
        if let Some(oscar_count) = changes.oscar_count {
            active.oscar_count = Set(oscar_count);
        }
        if let Some(release_date) = changes.release_date {
            active.release_date = Set(release_date.to_string());
        }
        if let Some(genre_id) = changes.genre_id {
            active.genre_id = Set(genre_id);
        }
        if let Some(language_id) = changes.language_id {
            active.language_id = Set(language_id);
        }

        if !active.is_changed() {
            return Ok(Some(existing));
        }

        let title = changes.title.unwrap_or(existing.title);
        let updated = active
            .update(&self.db)
            .await
            .map_err(|err| AppError::from_write(err, duplicate_title(&title)))?;
        Ok(Some(updated))
    }

    /// Returns false when no movie has `id`.
    pub async fn delete_movie(&self, id: i32) -> AppResult<bool> {
        let result = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn list_genres(&self) -> AppResult<Vec<genre::Model>> {
        Ok(genre::Entity::find().order_by_asc(genre::Column::Name).all(&self.db).await?)
    }

    pub async fn find_genre(&self, id: i32) -> AppResult<Option<genre::Model>> {
        Ok(genre::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Whether another genre already uses `name`, ignoring case. `excluding`
    /// skips the genre being renamed.
    pub async fn genre_name_taken(&self, name: &str, excluding: Option<i32>) -> AppResult<bool> {
        let mut query = genre::Entity::find().filter(genre::Column::NameKey.eq(fold_case(name)));
        if let Some(id) = excluding {
            query = query.filter(genre::Column::Id.ne(id));
        }
        Ok(query.one(&self.db).await?.is_some())
    }

    pub async fn create_genre(&self, name: String) -> AppResult<genre::Model> {
        let conflict = duplicate_genre(&name);
        let model = genre::ActiveModel {
            id: Default::default(),
            name_key: Set(fold_case(&name)),
            name: Set(name),
        };
        model.insert(&self.db).await.map_err(|err| AppError::from_write(err, conflict))
    }

    /// `None` when no genre has `id`; `Conflict` when a different genre already
    /// uses `name`.
    pub async fn rename_genre(&self, id: i32, name: String) -> AppResult<Option<genre::Model>> {
        let Some(existing) = genre::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let conflict = duplicate_genre(&name);
        if self.genre_name_taken(&name, Some(id)).await? {
            return Err(AppError::Conflict(conflict));
        }

        let mut active: genre::ActiveModel = existing.into();
        active.name_key = Set(fold_case(&name));
        active.name = Set(name);
        let updated =
            active.update(&self.db).await.map_err(|err| AppError::from_write(err, conflict))?;
        Ok(Some(updated))
    }

    pub async fn delete_genre(&self, id: i32) -> AppResult<bool> {
        let result = genre::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn list_languages(&self) -> AppResult<Vec<language::Model>> {
        Ok(language::Entity::find().order_by_asc(language::Column::Name).all(&self.db).await?)
    }

    async fn expand(&self, movies: Vec<movie::Model>) -> AppResult<Vec<MovieDetails>> {
        let genres = movies.load_one(genre::Entity, &self.db).await?;
        let languages = movies.load_one(language::Entity, &self.db).await?;

        movies
            .into_iter()
            .zip(genres)
            .zip(languages)
            .map(|((movie, genre), language)| MovieDetails::assemble(movie, genre, language))
            .collect()
    }
}

pub(crate) fn duplicate_title(title: &str) -> String {
    format!("a movie titled {title:?} already exists")
}

pub(crate) fn duplicate_genre(name: &str) -> String {
    format!("a genre named {name:?} already exists")
}
