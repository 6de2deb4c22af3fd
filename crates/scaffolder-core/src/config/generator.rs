//! Generated configuration files
//!
//! Every function here is a pure function of [`ProjectAnswers`]; writing the
//! output into the project lives in `templates::materialize`.

use super::answers::ProjectAnswers;
use serde::Serialize;
use std::collections::BTreeMap;

/// Rewrite every active `PORT=` line to the given port, keeping comments and other keys intact
pub fn rewrite_env_port(content: &str, port: u16) -> String {
    let mut replaced = false;
    let mut lines: Vec<String> = content
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if !trimmed.starts_with('#') && trimmed.starts_with("PORT=") {
                replaced = true;
                format!("PORT={}", port)
            } else {
                line.to_string()
            }
        })
        .collect();

    if !replaced {
        lines.push(format!("PORT={}", port));
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

/// Environment file used when the template does not ship one
pub fn default_env(answers: &ProjectAnswers) -> String {
    let name = &answers.name;
    let port = answers.port;
    format!(
        r#"# Server Configuration
PORT={port}
NODE_ENV=development

# Database Configuration
MONGO_URI=mongodb://localhost:27017/{name}
MONGO_DB_NAME={name}

# JWT Configuration
JWT_SECRET=your-super-secret-jwt-key-change-this-in-production
JWT_EXPIRES_IN=7d
JWT_REFRESH_EXPIRES_IN=30d

# CORS Configuration
ALLOWED_ORIGINS=http://localhost:3000,http://localhost:3001
ALLOWED_METHODS=GET,POST,PUT,DELETE,PATCH,OPTIONS
ALLOWED_HEADERS=Content-Type,Authorization,X-Requested-With

# Security Configuration
BCRYPT_ROUNDS=12
RATE_LIMIT_WINDOW_MS=900000
RATE_LIMIT_MAX_REQUESTS=100

# Logging Configuration
LOG_LEVEL=info
LOG_FORMAT=combined
"#
    )
}

pub fn gitignore() -> String {
    r#"# Dependencies
node_modules/

# Build output
dist/
build/
coverage/

# Environment
.env
.env.development
.env.production
.env.local

# Logs
logs/
*.log
npm-debug.log*
yarn-debug.log*
yarn-error.log*
pnpm-debug.log*

# Editors and OS
.idea/
.vscode/
*.swp
.DS_Store
Thumbs.db
"#
    .to_string()
}

pub fn readme(answers: &ProjectAnswers) -> String {
    let name = &answers.name;
    let port = answers.port;
    let features = answers.features;

    let mut scripts = vec![
        "- `npm run dev` - start the development server with reload".to_string(),
        "- `npm run build` - compile TypeScript into `dist/`".to_string(),
        "- `npm start` - run the compiled server".to_string(),
    ];
    if features.test {
        scripts.push("- `npm test` - run the Jest test suite".to_string());
    }
    if features.lint {
        scripts.push("- `npm run lint` - lint the sources with ESLint".to_string());
    }
    if features.format {
        scripts.push("- `npm run format` - format the sources with Prettier".to_string());
    }
    if features.docker {
        scripts.push("- `npm run docker:up` - start the API and MongoDB with Docker Compose".to_string());
    }

    let docker_section = if features.docker {
        format!(
            r#"
## Docker

```bash
docker compose up -d --build
```

The API is published on port {port} and MongoDB on port 27017.
"#
        )
    } else {
        String::new()
    };

    format!(
        r#"# {name}

{description}

## Getting Started

```bash
npm install
cp .env.example .env.development   # already done by the generator
npm run dev
```

The server listens on http://localhost:{port}.

## Scripts

{scripts}

## Endpoints

- `GET /health` - liveness: process status, timestamp and environment
- `GET /ready` - readiness: `200` once MongoDB is connected, `503` otherwise
- `/api` - application routes
{docker_section}
## Configuration

Settings are read from `.env.development` (or `.env.production` when
`NODE_ENV=production`). See `.env.example` for every supported key.

## License

{license} (c) {author}
"#,
        description = answers.description,
        scripts = scripts.join("\n"),
        license = answers.license,
        author = answers.author(),
    )
}

pub fn eslint_config() -> String {
    r#"{
  "root": true,
  "parser": "@typescript-eslint/parser",
  "parserOptions": {
    "ecmaVersion": 2022,
    "sourceType": "module"
  },
  "plugins": ["@typescript-eslint"],
  "extends": ["eslint:recommended", "plugin:@typescript-eslint/recommended"],
  "env": {
    "node": true,
    "es2022": true
  },
  "ignorePatterns": ["dist/", "node_modules/", "coverage/"],
  "rules": {
    "@typescript-eslint/no-unused-vars": ["error", { "argsIgnorePattern": "^_" }]
  }
}
"#
    .to_string()
}

pub fn prettier_config() -> String {
    r#"{
  "semi": true,
  "singleQuote": true,
  "trailingComma": "all",
  "printWidth": 100,
  "tabWidth": 2
}
"#
    .to_string()
}

/// Jest runs against the compiled output so no TypeScript transformer is needed
pub fn jest_config() -> String {
    r#"/** @type {import('jest').Config} */
module.exports = {
  testEnvironment: 'node',
  roots: ['<rootDir>/dist'],
  testMatch: ['**/?(*.)+(spec|test).js'],
  collectCoverageFrom: ['dist/**/*.js'],
};
"#
    .to_string()
}

/// Lifecycle scripts are skipped in both stages: `prepare` may call dev-only tools such as husky
pub fn dockerfile(answers: &ProjectAnswers) -> String {
    let port = answers.port;
    format!(
        r#"FROM node:20-alpine AS build
WORKDIR /app
COPY package*.json ./
RUN npm install --ignore-scripts
COPY . .
RUN npm run build

FROM node:20-alpine
WORKDIR /app
ENV NODE_ENV=production
COPY package*.json ./
RUN npm install --omit=dev --ignore-scripts
COPY --from=build /app/dist ./dist
EXPOSE {port}
CMD ["node", "dist/server.js"]
"#
    )
}

pub fn dockerignore() -> String {
    r#"node_modules
dist
coverage
npm-debug.log*
.git
.env
.env.*
!.env.example
Dockerfile
docker-compose.yml
"#
    .to_string()
}

#[derive(Debug, Serialize)]
struct ComposeFile {
    services: BTreeMap<String, ComposeService>,
    volumes: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Debug, Default, Serialize)]
struct ComposeService {
    #[serde(skip_serializing_if = "Option::is_none")]
    build: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    container_name: String,
    restart: String,
    ports: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    env_file: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    environment: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    volumes: Vec<String>,
}

/// Compose descriptor wiring the generated API to a MongoDB service
pub fn docker_compose(answers: &ProjectAnswers) -> Result<String, serde_yaml::Error> {
    let name = &answers.name;
    let port = answers.port;

    let api = ComposeService {
        build: Some(".".to_string()),
        container_name: name.clone(),
        restart: "unless-stopped".to_string(),
        ports: vec![format!("{port}:{port}")],
        env_file: vec![".env.development".to_string()],
        environment: BTreeMap::from([
            ("NODE_ENV".to_string(), "production".to_string()),
            ("PORT".to_string(), port.to_string()),
            ("MONGO_URI".to_string(), format!("mongodb://mongo:27017/{name}")),
        ]),
        depends_on: vec!["mongo".to_string()],
        ..Default::default()
    };

    let mongo = ComposeService {
        image: Some("mongo:7".to_string()),
        container_name: format!("{name}-mongo"),
        restart: "unless-stopped".to_string(),
        ports: vec!["27017:27017".to_string()],
        volumes: vec!["mongo-data:/data/db".to_string()],
        ..Default::default()
    };

    let compose = ComposeFile {
        services: BTreeMap::from([(name.clone(), api), ("mongo".to_string(), mongo)]),
        volumes: BTreeMap::from([("mongo-data".to_string(), BTreeMap::new())]),
    };

    serde_yaml::to_string(&compose)
}

pub fn husky_pre_commit() -> String {
    "npm run lint\nnpm test\n".to_string()
}
