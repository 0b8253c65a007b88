use sea_query::Iden;

#[derive(Iden, Clone, Copy)]
pub enum User {
    Table,
    Id,
    Name,
    Email,
    Password,
    AvatarUrl,
    IsVerified,
    IsAdmin,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum Recipe {
    Table,
    Id,
    UserId,
    Title,
    Description,
    ImageUrl,
    PrepTime,
    CookTime,
    Servings,
    Difficulty,
    RecipeType,
    SearchText,
    Rating,
    RatingCount,
    IsPublic,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum Ingredient {
    Table,
    Id,
    RecipeId,
    Name,
    Amount,
    Unit,
    Notes,
    OrderIndex,
}

#[derive(Iden, Clone, Copy)]
pub enum Instruction {
    Table,
    Id,
    RecipeId,
    Step,
    Text,
    ImageUrl,
    TimerMinutes,
}

#[derive(Iden, Clone, Copy)]
pub enum Tag {
    Table,
    Id,
    Name,
    Color,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum RecipeTag {
    Table,
    RecipeId,
    TagId,
}

#[derive(Iden, Clone, Copy)]
pub enum Rating {
    Table,
    Id,
    UserId,
    RecipeId,
    Value,
    Review,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum Nutrition {
    Table,
    Id,
    RecipeId,
    Calories,
    Protein,
    Carbs,
    Fat,
    Fiber,
    Sugar,
    Sodium,
    Cholesterol,
}

#[derive(Iden, Clone, Copy)]
pub enum UserFavorites {
    Table,
    UserId,
    RecipeId,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum Collection {
    Table,
    Id,
    UserId,
    Name,
    Description,
    ImageUrl,
    IsPublic,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum CollectionRecipes {
    Table,
    CollectionId,
    RecipeId,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum ShoppingList {
    Table,
    Id,
    UserId,
    Name,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum ShoppingListItem {
    Table,
    Id,
    ListId,
    Name,
    Amount,
    Unit,
    Notes,
    Completed,
    OrderIndex,
    CreatedAt,
    UpdatedAt,
}
